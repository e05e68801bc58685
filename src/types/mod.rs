// Public modules
pub mod agent_list;
pub mod chat_message;
pub mod health_status;
pub mod memory_stats;
pub mod task_annotations;
pub mod task_request;
pub mod task_response;
pub mod task_understanding;
pub mod vector_stats;

// Re-exports
pub use agent_list::AgentList;
pub use chat_message::{ChatMessage, ChatRole, MessageContent};
pub use health_status::HealthStatus;
pub use memory_stats::MemoryStats;
pub use task_annotations::TaskAnnotations;
pub use task_request::TaskRequest;
pub use task_response::TaskResponse;
pub use task_understanding::TaskUnderstanding;
pub use vector_stats::VectorStats;
