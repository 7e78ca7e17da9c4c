//! Generic REST resource access.
//!
//! Each backend collection is described once by a [`Resource`] marker type.
//! [`ResourceApi`] then provides list/get/create/update/delete for it:
//!
//! | Operation | Request |
//! |-----------|---------|
//! | `list`    | `GET {PATH}?search=..&status=..&page=..&limit=..&<filters>` |
//! | `get`     | `GET {PATH}/{id}` |
//! | `create`  | `POST {PATH}` |
//! | `update`  | `PUT {PATH}/{id}` |
//! | `delete`  | `DELETE {PATH}/{id}` |
//!
//! Reads go through the query cache under `[KEY, ...]`; successful writes
//! invalidate every entry under `[KEY]`.

use std::marker::PhantomData;

use schoolhub_cache::{FetchPolicy, QueryKey, keys};
use schoolhub_core::{Envelope, ListQuery, ListResponse};
use schoolhub_models as models;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::instrument;
use validator::Validate;

use crate::client::ApiClient;
use crate::error::ApiError;

/// A REST collection on the backend.
pub trait Resource: Send + Sync + 'static {
    type Entity: Serialize + DeserializeOwned + Clone + Send + Sync + 'static;
    type Form: Serialize + DeserializeOwned + Validate + Send + Sync;

    /// Collection path, e.g. `/hostel/buildings`.
    const PATH: &'static str;
    /// Cache key prefix, e.g. `hostel-buildings`.
    const KEY: &'static str;
    /// Plural display label, e.g. `Hostel Buildings`.
    const LABEL: &'static str;
    /// Singular display label, e.g. `Hostel Building`.
    const SINGULAR: &'static str;

    fn item_path(id: &str) -> String {
        format!("{}/{}", Self::PATH, path_segment(id))
    }

    fn all_key() -> QueryKey {
        keys::all(Self::KEY)
    }
}

/// Percent-encodes `value` for use as a single URL path segment.
pub fn path_segment(value: &str) -> String {
    let encoded = reqwest::Url::parse("http://segment/").ok().and_then(|mut url| {
        url.path_segments_mut().ok()?.clear().push(value);
        Some(url.path().trim_start_matches('/').to_owned())
    });
    encoded.unwrap_or_else(|| value.to_owned())
}

macro_rules! define_resource {
    (
        $(
            $(#[$meta:meta])*
            $name:ident {
                entity: $entity:ty,
                form: $form:ty,
                path: $path:literal,
                key: $key:literal,
                label: $label:literal,
                singular: $singular:literal $(,)?
            }
        )*
    ) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, Copy, Default)]
            pub struct $name;

            impl Resource for $name {
                type Entity = $entity;
                type Form = $form;
                const PATH: &'static str = $path;
                const KEY: &'static str = $key;
                const LABEL: &'static str = $label;
                const SINGULAR: &'static str = $singular;
            }
        )*
    };
}

pub mod resources {
    use super::*;

    define_resource! {
        Students {
            entity: models::Student,
            form: models::StudentForm,
            path: "/students",
            key: "students",
            label: "Students",
            singular: "Student",
        }
        Parents {
            entity: models::Parent,
            form: models::ParentForm,
            path: "/parents",
            key: "parents",
            label: "Parents",
            singular: "Parent",
        }
        Teachers {
            entity: models::Teacher,
            form: models::TeacherForm,
            path: "/teachers",
            key: "teachers",
            label: "Teachers",
            singular: "Teacher",
        }
        Departments {
            entity: models::Department,
            form: models::DepartmentForm,
            path: "/departments",
            key: "departments",
            label: "Departments",
            singular: "Department",
        }
        Subjects {
            entity: models::Subject,
            form: models::SubjectForm,
            path: "/subjects",
            key: "subjects",
            label: "Subjects",
            singular: "Subject",
        }
        Classes {
            entity: models::Class,
            form: models::ClassForm,
            path: "/classes",
            key: "classes",
            label: "Classes",
            singular: "Class",
        }
        Sections {
            entity: models::Section,
            form: models::SectionForm,
            path: "/sections",
            key: "sections",
            label: "Sections",
            singular: "Section",
        }
        Exams {
            entity: models::Exam,
            form: models::ExamForm,
            path: "/exams",
            key: "exams",
            label: "Exams",
            singular: "Exam",
        }
        ExamResults {
            entity: models::ExamResult,
            form: models::ExamResultForm,
            path: "/exams/results",
            key: "exam-results",
            label: "Exam Results",
            singular: "Exam Result",
        }
        FeeStructures {
            entity: models::FeeStructure,
            form: models::FeeStructureForm,
            path: "/fees/structures",
            key: "fee-structures",
            label: "Fee Structures",
            singular: "Fee Structure",
        }
        FeePayments {
            entity: models::FeePayment,
            form: models::FeePaymentForm,
            path: "/fees/payments",
            key: "fee-payments",
            label: "Fee Payments",
            singular: "Fee Payment",
        }
        Books {
            entity: models::Book,
            form: models::BookForm,
            path: "/library/books",
            key: "books",
            label: "Books",
            singular: "Book",
        }
        BookIssues {
            entity: models::BookIssue,
            form: models::IssueBookForm,
            path: "/library/issues",
            key: "book-issues",
            label: "Book Issues",
            singular: "Book Issue",
        }
        Vehicles {
            entity: models::Vehicle,
            form: models::VehicleForm,
            path: "/transport/vehicles",
            key: "vehicles",
            label: "Vehicles",
            singular: "Vehicle",
        }
        TransportRoutes {
            entity: models::TransportRoute,
            form: models::TransportRouteForm,
            path: "/transport/routes",
            key: "transport-routes",
            label: "Routes",
            singular: "Route",
        }
        TransportAllocations {
            entity: models::TransportAllocation,
            form: models::TransportAllocationForm,
            path: "/transport/allocations",
            key: "transport-allocations",
            label: "Transport Allocations",
            singular: "Transport Allocation",
        }
        HostelBuildings {
            entity: models::HostelBuilding,
            form: models::HostelBuildingForm,
            path: "/hostel/buildings",
            key: "hostel-buildings",
            label: "Hostel Buildings",
            singular: "Hostel Building",
        }
        HostelRooms {
            entity: models::HostelRoom,
            form: models::HostelRoomForm,
            path: "/hostel/rooms",
            key: "hostel-rooms",
            label: "Rooms",
            singular: "Room",
        }
        HostelAllocations {
            entity: models::HostelAllocation,
            form: models::HostelAllocationForm,
            path: "/hostel/allocations",
            key: "hostel-allocations",
            label: "Hostel Allocations",
            singular: "Hostel Allocation",
        }
        Staff {
            entity: models::Staff,
            form: models::StaffForm,
            path: "/hr/staff",
            key: "staff",
            label: "Staff",
            singular: "Staff Member",
        }
        LeaveRequests {
            entity: models::LeaveRequest,
            form: models::LeaveRequestForm,
            path: "/hr/leaves",
            key: "leave-requests",
            label: "Leave Requests",
            singular: "Leave Request",
        }
        InventoryItems {
            entity: models::InventoryItem,
            form: models::InventoryItemForm,
            path: "/inventory/items",
            key: "inventory-items",
            label: "Inventory Items",
            singular: "Inventory Item",
        }
        Suppliers {
            entity: models::Supplier,
            form: models::SupplierForm,
            path: "/inventory/suppliers",
            key: "suppliers",
            label: "Suppliers",
            singular: "Supplier",
        }
        PurchaseOrders {
            entity: models::PurchaseOrder,
            form: models::PurchaseOrderForm,
            path: "/inventory/purchase-orders",
            key: "purchase-orders",
            label: "Purchase Orders",
            singular: "Purchase Order",
        }
        Notices {
            entity: models::Notice,
            form: models::NoticeForm,
            path: "/notices",
            key: "notices",
            label: "Notices",
            singular: "Notice",
        }
        Messages {
            entity: models::Message,
            form: models::MessageForm,
            path: "/messages",
            key: "messages",
            label: "Messages",
            singular: "Message",
        }
    }
}

/// CRUD calls for one resource. Obtain with [`ApiClient::resource`].
pub struct ResourceApi<'a, R> {
    client: &'a ApiClient,
    _resource: PhantomData<R>,
}

impl<'a, R: Resource> ResourceApi<'a, R> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self {
            client,
            _resource: PhantomData,
        }
    }

    pub async fn list(&self, query: &ListQuery) -> Result<ListResponse<R::Entity>, ApiError> {
        self.list_with(query, FetchPolicy::CacheFirst).await
    }

    #[instrument(skip(self), fields(resource = R::KEY))]
    pub async fn list_with(
        &self,
        query: &ListQuery,
        policy: FetchPolicy,
    ) -> Result<ListResponse<R::Entity>, ApiError> {
        let key = keys::list(R::KEY, query);
        let params = query.to_params();
        self.client
            .cache()
            .fetch_with(policy, &key, || self.client.get(R::PATH, &params))
            .await
    }

    pub async fn get(&self, id: &str) -> Result<R::Entity, ApiError> {
        self.get_with(id, FetchPolicy::CacheFirst).await
    }

    #[instrument(skip(self), fields(resource = R::KEY))]
    pub async fn get_with(&self, id: &str, policy: FetchPolicy) -> Result<R::Entity, ApiError> {
        let key = keys::detail(R::KEY, id);
        let path = R::item_path(id);
        self.client
            .cache()
            .fetch_with(policy, &key, || async {
                let envelope: Envelope<R::Entity> = self.client.get(&path, &[]).await?;
                Ok::<_, ApiError>(envelope.into_inner())
            })
            .await
    }

    #[instrument(skip(self, form), fields(resource = R::KEY))]
    pub async fn create(&self, form: &R::Form) -> Result<R::Entity, ApiError> {
        let created: Envelope<R::Entity> = self.client.post(R::PATH, form).await?;
        self.invalidate().await;
        Ok(created.into_inner())
    }

    /// Replaces the entity with the full form.
    #[instrument(skip(self, form), fields(resource = R::KEY))]
    pub async fn update(&self, id: &str, form: &R::Form) -> Result<R::Entity, ApiError> {
        let updated: Envelope<R::Entity> = self.client.put(&R::item_path(id), form).await?;
        self.invalidate().await;
        Ok(updated.into_inner())
    }

    #[instrument(skip(self), fields(resource = R::KEY))]
    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.client.delete(&R::item_path(id)).await?;
        self.invalidate().await;
        Ok(())
    }

    /// Drops every cached list and detail entry of this resource.
    pub async fn invalidate(&self) -> usize {
        self.client.cache().invalidate(&R::all_key()).await
    }
}
