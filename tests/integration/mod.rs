//! API integration tests

mod authors_test;
mod books_test;
mod users_test;
