use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "employee_id": "E1",
        "leave_type_id": 1,
        "year": 2024,
        "entitled_days": 20.0,
        "used_days": 3.0
    })
)]
pub struct LeaveBalance {
    #[schema(example = 1)]
    pub id: i64,

    #[schema(example = "E1")]
    pub employee_id: String,

    #[schema(example = 1)]
    pub leave_type_id: i64,

    #[schema(example = 2024)]
    pub year: i64,

    #[schema(example = 20.0)]
    pub entitled_days: f64,

    #[schema(example = 3.0)]
    pub used_days: f64,
}
