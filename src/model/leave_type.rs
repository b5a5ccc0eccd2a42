use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "name": "Vacation",
        "default_days_entitled": 20
    })
)]
pub struct LeaveType {
    #[schema(example = 1)]
    pub id: i64,

    #[schema(example = "Vacation")]
    pub name: String,

    #[schema(example = 20, nullable = true)]
    pub default_days_entitled: Option<i64>,
}
