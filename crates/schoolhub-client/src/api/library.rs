use schoolhub_core::Envelope;
use schoolhub_models::ids::BookIssueId;
use schoolhub_models::{BookIssue, IssueBookForm, ReturnBookRequest};
use tracing::instrument;

use super::invalidate_all;
use crate::resource::Resource;
use crate::resource::resources::{BookIssues, Books};
use crate::{ApiClient, ApiError};

pub struct LibraryApi;

impl LibraryApi {
    /// `POST /library/issues`. Also changes the book's available copies.
    #[instrument(skip(client, form), fields(book_id = %form.book_id, student_id = %form.student_id))]
    pub async fn issue_book(client: &ApiClient, form: &IssueBookForm) -> Result<BookIssue, ApiError> {
        let issue: Envelope<BookIssue> = client.post(BookIssues::PATH, form).await?;
        invalidate_all(client, &[BookIssues::KEY, Books::KEY]).await;
        Ok(issue.into_inner())
    }

    /// `PUT /library/issues/{id}/return`.
    #[instrument(skip(client, request))]
    pub async fn return_book(
        client: &ApiClient,
        issue_id: &BookIssueId,
        request: &ReturnBookRequest,
    ) -> Result<BookIssue, ApiError> {
        let path = format!("{}/return", BookIssues::item_path(issue_id));
        let issue: Envelope<BookIssue> = client.put(&path, request).await?;
        invalidate_all(client, &[BookIssues::KEY, Books::KEY]).await;
        Ok(issue.into_inner())
    }
}
