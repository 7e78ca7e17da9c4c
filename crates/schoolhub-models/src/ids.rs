//! Strongly-typed ID newtypes for domain entities.
//!
//! Backend identifiers are opaque strings. Each entity gets its own newtype
//! so a `ClassId` cannot be passed where a `StudentId` is expected, while
//! still serializing as a plain JSON string.
//!
//! # Example
//!
//! ```ignore
//! use schoolhub_models::ids::{ClassId, StudentId};
//!
//! fn load_student(id: &StudentId) { /* ... */ }
//!
//! let student_id = StudentId::new("stu_42");
//! let class_id = ClassId::new("cls_7");
//!
//! load_student(&student_id);    // OK
//! // load_student(&class_id);   // Compile error! Type mismatch.
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;

/// Macro to define a strongly-typed string ID newtype.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            #[inline]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            #[inline]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            #[inline]
            pub fn into_inner(self) -> String {
                self.0
            }

            /// Whether the ID is empty or whitespace, i.e. not yet chosen in a form.
            #[inline]
            pub fn is_blank(&self) -> bool {
                self.0.trim().is_empty()
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            #[inline]
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            #[inline]
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<$name> for String {
            #[inline]
            fn from(id: $name) -> String {
                id.0
            }
        }

        impl AsRef<str> for $name {
            #[inline]
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl Deref for $name {
            type Target = str;

            #[inline]
            fn deref(&self) -> &str {
                &self.0
            }
        }

        impl std::str::FromStr for $name {
            type Err = std::convert::Infallible;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.to_string()))
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }
    };
}

define_id!(
    /// Strongly-typed ID for User entities.
    UserId
);

define_id!(
    /// Strongly-typed ID for Parent entities.
    ParentId
);

define_id!(
    /// Strongly-typed ID for Student entities.
    StudentId
);

define_id!(
    /// Strongly-typed ID for Teacher entities.
    TeacherId
);

define_id!(
    /// Strongly-typed ID for Department entities.
    DepartmentId
);

define_id!(
    /// Strongly-typed ID for Subject entities.
    SubjectId
);

define_id!(
    /// Strongly-typed ID for Class entities.
    ClassId
);

define_id!(
    /// Strongly-typed ID for Section entities.
    SectionId
);

define_id!(
    /// Strongly-typed ID for AttendanceRecord entities.
    AttendanceId
);

define_id!(
    /// Strongly-typed ID for Exam entities.
    ExamId
);

define_id!(
    /// Strongly-typed ID for ExamResult entities.
    ExamResultId
);

define_id!(
    /// Strongly-typed ID for FeeStructure entities.
    FeeStructureId
);

define_id!(
    /// Strongly-typed ID for FeePayment entities.
    FeePaymentId
);

define_id!(
    /// Strongly-typed ID for Book entities.
    BookId
);

define_id!(
    /// Strongly-typed ID for BookIssue entities.
    BookIssueId
);

define_id!(
    /// Strongly-typed ID for Vehicle entities.
    VehicleId
);

define_id!(
    /// Strongly-typed ID for TransportRoute entities.
    RouteId
);

define_id!(
    /// Strongly-typed ID for RouteStop entities.
    RouteStopId
);

define_id!(
    /// Strongly-typed ID for TransportAllocation entities.
    TransportAllocationId
);

define_id!(
    /// Strongly-typed ID for HostelBuilding entities.
    BuildingId
);

define_id!(
    /// Strongly-typed ID for HostelRoom entities.
    RoomId
);

define_id!(
    /// Strongly-typed ID for HostelAllocation entities.
    HostelAllocationId
);

define_id!(
    /// Strongly-typed ID for Staff entities.
    StaffId
);

define_id!(
    /// Strongly-typed ID for Salary entities.
    SalaryId
);

define_id!(
    /// Strongly-typed ID for LeaveRequest entities.
    LeaveRequestId
);

define_id!(
    /// Strongly-typed ID for InventoryItem entities.
    InventoryItemId
);

define_id!(
    /// Strongly-typed ID for Supplier entities.
    SupplierId
);

define_id!(
    /// Strongly-typed ID for PurchaseOrder entities.
    PurchaseOrderId
);

define_id!(
    /// Strongly-typed ID for Notice entities.
    NoticeId
);

define_id!(
    /// Strongly-typed ID for Message entities.
    MessageId
);
