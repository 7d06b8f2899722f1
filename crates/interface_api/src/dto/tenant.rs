//! Tenant DTOs

use serde::Deserialize;
use validator::Validate;

use app_services::NewTenant;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateTenantRequest {
    #[validate(length(min = 1, max = 50))]
    pub name: String,
    #[validate(length(min = 1, max = 20))]
    pub phone: String,
}

impl From<CreateTenantRequest> for NewTenant {
    fn from(request: CreateTenantRequest) -> Self {
        NewTenant {
            name: request.name,
            phone: request.phone,
        }
    }
}
