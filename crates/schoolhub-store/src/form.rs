//! Create/edit form submission.
//!
//! [`FormSubmitter::submit`] validates locally first; an invalid form never
//! reaches the network. On success it invalidates the configured cache
//! prefixes, then shows the success toast, then navigates, in that order.
//! On failure the server's message is shown as an error toast.

use std::future::Future;

use schoolhub_cache::{QueryCache, QueryKey};
use schoolhub_client::{ApiError, Resource};
use schoolhub_core::{FormErrors, validate_form};
use thiserror::Error;
use tracing::{info, warn};
use validator::Validate;

use crate::effects::{Effect, EffectSender, Toast};
use crate::navigation::Route;

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("form is invalid: {0}")]
    Invalid(FormErrors),

    #[error(transparent)]
    Api(#[from] ApiError),
}

impl SubmitError {
    pub fn field_errors(&self) -> Option<&FormErrors> {
        match self {
            Self::Invalid(errors) => Some(errors),
            Self::Api(_) => None,
        }
    }
}

/// Where to go after a successful submit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AfterSubmit {
    #[default]
    Stay,
    Back,
    Navigate(Route),
}

#[derive(Debug, Clone)]
pub struct FormSubmitter {
    cache: QueryCache,
    effects: EffectSender,
    invalidates: Vec<QueryKey>,
    success_message: Option<String>,
    after: AfterSubmit,
}

impl FormSubmitter {
    pub fn new(cache: QueryCache, effects: EffectSender) -> Self {
        Self {
            cache,
            effects,
            invalidates: Vec::new(),
            success_message: None,
            after: AfterSubmit::Stay,
        }
    }

    /// Create form for a resource: refreshes its lists and returns to them.
    pub fn for_create<R: Resource>(cache: QueryCache, effects: EffectSender) -> Self {
        Self::new(cache, effects)
            .invalidate(R::all_key())
            .success_toast(format!("{} created successfully", R::SINGULAR))
            .then_back()
    }

    pub fn for_update<R: Resource>(cache: QueryCache, effects: EffectSender) -> Self {
        Self::new(cache, effects)
            .invalidate(R::all_key())
            .success_toast(format!("{} updated successfully", R::SINGULAR))
            .then_back()
    }

    pub fn invalidate(mut self, key: impl Into<QueryKey>) -> Self {
        self.invalidates.push(key.into());
        self
    }

    pub fn success_toast(mut self, message: impl Into<String>) -> Self {
        self.success_message = Some(message.into());
        self
    }

    pub fn then_back(mut self) -> Self {
        self.after = AfterSubmit::Back;
        self
    }

    pub fn then_navigate(mut self, route: Route) -> Self {
        self.after = AfterSubmit::Navigate(route);
        self
    }

    pub async fn submit<F, T, S, Fut>(&self, form: &F, send: S) -> Result<T, SubmitError>
    where
        F: Validate,
        S: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        if let Err(errors) = validate_form(form) {
            info!(fields = errors.len(), "Form rejected before submit");
            return Err(SubmitError::Invalid(errors));
        }

        match send().await {
            Ok(value) => {
                for key in &self.invalidates {
                    self.cache.invalidate(key).await;
                }
                if let Some(message) = &self.success_message {
                    self.effects.toast(Toast::success(message.clone()));
                }
                match &self.after {
                    AfterSubmit::Stay => {}
                    AfterSubmit::Back => self.effects.back(),
                    AfterSubmit::Navigate(route) => self.effects.navigate(route.clone()),
                }
                Ok(value)
            }
            Err(e) => {
                warn!(error = %e, "Form submit failed");
                self.effects.toast(Toast::error(e.user_message()));
                if e.is_unauthorized() {
                    self.effects.send(Effect::ResetTo(Route::Login));
                }
                Err(SubmitError::Api(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::effect_channel;
    use schoolhub_cache::keys;
    use schoolhub_client::resources::HostelBuildings;
    use schoolhub_models::HostelBuildingForm;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn building(name: &str) -> HostelBuildingForm {
        HostelBuildingForm {
            name: name.into(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_invalid_form_makes_no_call() {
        let (tx, mut rx) = effect_channel();
        let submitter = FormSubmitter::for_create::<HostelBuildings>(QueryCache::default(), tx);
        let calls = AtomicUsize::new(0);

        let result = submitter
            .submit(&building("  "), || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok::<_, ApiError>(())
            })
            .await;

        let errors = result.unwrap_err();
        assert_eq!(
            errors.field_errors().and_then(|e| e.first("name")),
            Some("This field is required")
        );
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(rx.drain().is_empty());
    }

    #[tokio::test]
    async fn test_success_invalidates_then_toasts_then_navigates() {
        let cache = QueryCache::new(Duration::from_secs(60));
        let list_key = keys::all("hostel-buildings").child("list");
        cache.set(&list_key, &vec!["North Wing"]).await;

        let (tx, mut rx) = effect_channel();
        let submitter = FormSubmitter::for_create::<HostelBuildings>(cache.clone(), tx);
        submitter
            .submit(&building("South Wing"), || async { Ok::<_, ApiError>(()) })
            .await
            .unwrap();

        assert!(cache.get::<Vec<String>>(&list_key).await.is_none());
        assert_eq!(
            rx.drain(),
            vec![
                Effect::ShowToast(Toast::success("Hostel Building created successfully")),
                Effect::NavigateBack,
            ]
        );
    }

    #[tokio::test]
    async fn test_api_error_toasts_server_message() {
        let (tx, mut rx) = effect_channel();
        let submitter = FormSubmitter::new(QueryCache::default(), tx)
            .success_toast("Saved")
            .then_navigate(Route::Dashboard);

        let result = submitter
            .submit(&building("North Wing"), || async {
                Err::<(), _>(ApiError::Status {
                    status: 409,
                    message: "Building name already exists".into(),
                })
            })
            .await;

        assert!(matches!(result, Err(SubmitError::Api(_))));
        assert_eq!(
            rx.drain(),
            vec![Effect::ShowToast(Toast::error("Building name already exists"))]
        );
    }

    #[tokio::test]
    async fn test_stay_emits_only_toast() {
        let (tx, mut rx) = effect_channel();
        let submitter = FormSubmitter::new(QueryCache::default(), tx).success_toast("Saved");
        let value = submitter
            .submit(&building("East"), || async { Ok::<_, ApiError>(7) })
            .await
            .unwrap();

        assert_eq!(value, 7);
        assert_eq!(rx.drain(), vec![Effect::ShowToast(Toast::success("Saved"))]);
    }
}
