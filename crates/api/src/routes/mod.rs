pub mod annual_card;
pub mod coach;
pub mod dashboard;
pub mod events;
pub mod health;
pub mod private_training;
