use crate::api::PageQuery;
use crate::api::leave_balance::{BalanceQuery, CreateLeaveBalance, UpdateLeaveBalance};
use crate::api::leave_request::{CreateLeaveRequest, RequestFilter, StatusUpdate};
use crate::api::leave_type::{CreateLeaveType, UpdateLeaveType};
use crate::api::report::SummaryQuery;
use crate::leave::report::LeaveSummaryRow;
use crate::model::leave_balance::LeaveBalance;
use crate::model::leave_request::LeaveRequest;
use crate::model::leave_type::LeaveType;
use crate::model::status::LeaveStatus;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Leave Management API",
        version = "1.0.0",
        description = r#"
## Leave Management Service

Back-office leave engine: leave types, per-employee yearly balances, and the
request approval workflow.

### 🔹 Key Features
- **Leave Types**
  - Define leave categories with default entitlements
- **Leave Balances**
  - Provision and adjust per-employee yearly balances
- **Leave Requests**
  - Submit, approve, reject, and cancel requests; used days stay in sync
- **Reports**
  - Leave summary per type

### 🔐 Security
Endpoints are protected using **JWT Bearer authentication**.
Write operations on types and balances require **Admin** or **HR** roles.

### 📦 Response Format
- JSON-based RESTful responses
- Errors carry a `detail` message

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::leave_type::create_type,
        crate::api::leave_type::list_types,
        crate::api::leave_type::get_type,
        crate::api::leave_type::update_type,
        crate::api::leave_type::delete_type,

        crate::api::leave_balance::create_balance,
        crate::api::leave_balance::list_employee_balances,
        crate::api::leave_balance::update_balance,

        crate::api::leave_request::submit_request,
        crate::api::leave_request::my_requests,
        crate::api::leave_request::get_request,
        crate::api::leave_request::list_requests,
        crate::api::leave_request::update_status,

        crate::api::report::leave_summary
    ),
    components(
        schemas(
            LeaveType,
            CreateLeaveType,
            UpdateLeaveType,
            LeaveBalance,
            CreateLeaveBalance,
            UpdateLeaveBalance,
            BalanceQuery,
            LeaveRequest,
            LeaveStatus,
            CreateLeaveRequest,
            StatusUpdate,
            RequestFilter,
            PageQuery,
            SummaryQuery,
            LeaveSummaryRow
        )
    ),
    tags(
        (name = "Leave types", description = "Leave type registry"),
        (name = "Leave balances", description = "Per-employee yearly balances"),
        (name = "Leave requests", description = "Request lifecycle APIs"),
        (name = "Leave reports", description = "Leave aggregation queries"),
    )
)]
pub struct ApiDoc;
