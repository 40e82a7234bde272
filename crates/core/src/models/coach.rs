use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::GymResult;
use crate::validation::{self, EMPLOYEE_NO_MAX_LEN, NAME_MAX_LEN};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coach {
    pub employee_no: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCoachRequest {
    pub employee_no: String,
    pub name: String,
}

impl CreateCoachRequest {
    pub fn normalized(&self) -> GymResult<Self> {
        Ok(Self {
            employee_no: validation::required("employee_no", &self.employee_no, EMPLOYEE_NO_MAX_LEN)?,
            name: validation::required("name", &self.name, NAME_MAX_LEN)?,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateCoachRequest {
    pub name: String,
}

impl UpdateCoachRequest {
    pub fn normalized(&self) -> GymResult<Self> {
        Ok(Self {
            name: validation::required("name", &self.name, NAME_MAX_LEN)?,
        })
    }
}
