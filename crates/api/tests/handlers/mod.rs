mod annual_card_test;
mod coach_test;
mod dashboard_test;
mod events_test;
mod health_test;
mod middleware_test;
mod private_training_test;
