pub mod series;
pub mod r#match;
pub mod scorecard;
pub mod signup;
