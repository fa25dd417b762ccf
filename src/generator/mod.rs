pub mod context;
pub mod generative;
pub mod guard;
pub mod outlet;
pub mod post;
pub mod selector;
pub mod template;
pub mod topics;
pub mod workflow;
