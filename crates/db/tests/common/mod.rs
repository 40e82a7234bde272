#![allow(dead_code)]

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use gym_core::models::{
    annual_card::AnnualCardMemberRequest, private_training::CreatePrivateTrainingMemberRequest,
    Gender,
};
use gym_db::{create_memory_pool, schema::initialize_database, DbPool};
use rust_decimal::Decimal;

// In-memory database with the schema applied
pub async fn test_pool() -> DbPool {
    let pool = create_memory_pool().await.unwrap();
    initialize_database(&pool).await.unwrap();
    pool
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
}

pub fn member_request(name: &str, total_sessions: i64, initial_paid_amount: Decimal) -> CreatePrivateTrainingMemberRequest {
    CreatePrivateTrainingMemberRequest {
        name: name.to_string(),
        gender: Gender::Female,
        phone: "13800000000".to_string(),
        initial_paid_amount,
        total_sessions,
    }
}

pub fn card_request(name: &str, start_date: NaiveDate, end_date: NaiveDate) -> AnnualCardMemberRequest {
    AnnualCardMemberRequest {
        name: name.to_string(),
        gender: Gender::Male,
        phone: "13900000000".to_string(),
        start_date,
        end_date,
    }
}
