pub mod corpus;
pub mod error;
pub mod filters;
pub mod generative;
pub mod line;
pub mod logger;
pub mod models;
pub mod rag;
pub mod routing;
