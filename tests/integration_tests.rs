//! Integration tests for the Deskmate client.
//! These tests require a running orchestrator backend; set DESKMATE_BASE_URL
//! to its address to enable them.

#[cfg(test)]
mod tests {
    use deskmate::{Deskmate, TaskRequest};

    fn backend_url() -> Option<String> {
        std::env::var("DESKMATE_BASE_URL").ok()
    }

    #[tokio::test]
    async fn test_health_probe() {
        let Some(url) = backend_url() else {
            eprintln!("Skipping test: DESKMATE_BASE_URL not set");
            return;
        };

        let client = Deskmate::new(Some(url)).expect("Failed to create client");
        assert!(
            client.is_healthy().await,
            "Backend should report healthy when reachable"
        );
    }

    #[tokio::test]
    async fn test_agents_and_stats() {
        let Some(url) = backend_url() else {
            eprintln!("Skipping test: DESKMATE_BASE_URL not set");
            return;
        };

        let client = Deskmate::new(Some(url)).expect("Failed to create client");

        let agents = client.list_agents().await;
        assert!(agents.is_ok(), "Agent directory should be available");

        let memory = client.memory_stats().await;
        assert!(memory.is_ok(), "Memory stats should be available");

        let vector = client.vector_stats().await;
        assert!(vector.is_ok(), "Vector stats should be available");
    }

    #[tokio::test]
    async fn test_task_round_trip() {
        let Some(url) = backend_url() else {
            eprintln!("Skipping test: DESKMATE_BASE_URL not set");
            return;
        };

        let client = Deskmate::new(Some(url)).expect("Failed to create client");

        let response = client.submit_task(TaskRequest::new("你好")).await;
        assert!(
            response.is_ok(),
            "Task dispatch should succeed against a healthy backend"
        );
    }
}
