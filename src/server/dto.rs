use serde::Serialize;

use crate::query::CitizenProfile;
use crate::types::Citizen;

#[derive(Debug, Serialize)]
pub struct CitizenDetailsResponse {
    pub username: String,
    pub age: u16,
    pub fruits: Vec<String>,
    pub vegetables: Vec<String>,
}

impl From<CitizenProfile> for CitizenDetailsResponse {
    fn from(profile: CitizenProfile) -> Self {
        Self {
            username: profile.citizen.name,
            age: profile.citizen.age,
            fruits: profile.fruits,
            vegetables: profile.vegetables,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CitizenSummary {
    pub username: String,
    pub age: u16,
    pub address: String,
    pub phone_number: String,
}

impl From<&Citizen> for CitizenSummary {
    fn from(citizen: &Citizen) -> Self {
        Self {
            username: citizen.name.clone(),
            age: citizen.age,
            address: citizen.address.to_string(),
            phone_number: citizen.phone_number.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TwoCitizensResponse {
    pub citizens: Vec<CitizenSummary>,
    pub common_live_brown_eyed_friends: Vec<CitizenSummary>,
}

#[derive(Debug, Serialize)]
pub struct EmployeeLink {
    pub id: i64,
    pub username: String,
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct CompanyEmployeesResponse {
    pub company_id: i64,
    pub company_name: String,
    pub employees: Vec<EmployeeLink>,
}
