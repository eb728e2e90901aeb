pub mod initial;
pub mod trajectory;
