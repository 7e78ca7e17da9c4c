//! # SchoolHub Models
//!
//! Domain entities and form DTOs for the SchoolHub client.
//!
//! Entities mirror what the backend returns (camelCase JSON, SCREAMING_SNAKE_CASE
//! enums). Forms derive [`validator::Validate`] and are checked on the client
//! before any request is made; see [`schoolhub_core::validate_form`].
//!
//! # Modules
//!
//! - [`auth`]: Login, session payload, and password change
//! - [`users`]: Accounts, roles, and parents
//! - [`students`]: Students
//! - [`academics`]: Teachers, departments, subjects, classes, and sections
//! - [`attendance`]: Attendance records and summaries
//! - [`exams`]: Exams, results, and grading
//! - [`fees`]: Fee structures and payments
//! - [`library`]: Books and issues
//! - [`transport`]: Vehicles, routes, and allocations
//! - [`hostel`]: Buildings, rooms, and allocations
//! - [`hr`]: Staff, salaries, and leave
//! - [`inventory`]: Items, suppliers, and purchase orders
//! - [`communication`]: Notices and messages
//! - [`reports`]: Dashboard statistics
//!
//! # Example
//!
//! ```ignore
//! use schoolhub_core::validate_form;
//! use schoolhub_models::hostel::HostelBuildingForm;
//!
//! let form = HostelBuildingForm { name: "Block A".into(), ..Default::default() };
//! validate_form(&form)?;
//! ```

pub mod academics;
pub mod attendance;
pub mod auth;
pub mod communication;
pub mod exams;
pub mod fees;
pub mod hostel;
pub mod hr;
pub mod ids;
pub mod inventory;
pub mod library;
pub mod reports;
pub mod students;
pub mod transport;
pub mod users;
pub mod value_types;

pub use auth::{ChangePasswordRequest, LoginRequest, LoginResponse, MessageResponse};
pub use users::{Gender, Parent, ParentForm, User, UserRole};

pub use academics::{
    Class, ClassForm, Department, DepartmentForm, Section, SectionForm, Subject, SubjectForm,
    Teacher, TeacherForm, TeacherStatus,
};
pub use attendance::{
    AttendanceEntry, AttendanceRecord, AttendanceStanding, AttendanceStatus, AttendanceSummary,
    BulkAttendanceForm,
};
pub use communication::{Message, MessageForm, Notice, NoticeAudience, NoticeForm, NoticePriority};
pub use exams::{Exam, ExamForm, ExamResult, ExamResultForm, ExamType};
pub use fees::{
    FeeFrequency, FeePayment, FeePaymentForm, FeeStructure, FeeStructureForm, PaymentMode,
    PaymentStatus, StudentFeeStatus,
};
pub use hostel::{
    AllocationStatus, HostelAllocation, HostelAllocationForm, HostelBuilding, HostelBuildingForm,
    HostelRoom, HostelRoomForm, RoomType, VacateRequest,
};
pub use hr::{
    LeaveRequest, LeaveRequestForm, LeaveStatus, LeaveStatusUpdate, LeaveType, Salary,
    SalaryStatus, Staff, StaffForm, StaffStatus,
};
pub use inventory::{
    InventoryItem, InventoryItemForm, OrderStatusUpdate, PurchaseOrder, PurchaseOrderForm,
    PurchaseOrderItem, PurchaseOrderStatus, Supplier, SupplierForm,
};
pub use library::{Book, BookForm, BookIssue, BookIssueStatus, IssueBookForm, ReturnBookRequest};
pub use reports::DashboardStats;
pub use students::{Student, StudentForm, StudentStatus};
pub use transport::{
    RouteStop, TransportAllocation, TransportAllocationForm, TransportRoute, TransportRouteForm,
    Vehicle, VehicleForm, VehicleStatus,
};
pub use value_types::{Email, PhoneNumber, ValueTypeError};

/// An entity with a server-assigned identifier.
///
/// Used to build detail cache keys and `/{resource}/{id}` paths without
/// knowing the concrete ID type.
pub trait HasId {
    fn id(&self) -> &str;
}

macro_rules! impl_has_id {
    ($($entity:ty),* $(,)?) => {
        $(
            impl HasId for $entity {
                fn id(&self) -> &str {
                    self.id.as_str()
                }
            }
        )*
    };
}

impl_has_id!(
    User,
    Parent,
    Student,
    Teacher,
    Department,
    Subject,
    Class,
    Section,
    AttendanceRecord,
    Exam,
    ExamResult,
    FeeStructure,
    FeePayment,
    Book,
    BookIssue,
    Vehicle,
    TransportRoute,
    TransportAllocation,
    HostelBuilding,
    HostelRoom,
    HostelAllocation,
    Staff,
    Salary,
    LeaveRequest,
    InventoryItem,
    Supplier,
    PurchaseOrder,
    Notice,
    Message,
);
