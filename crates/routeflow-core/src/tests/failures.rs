#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::json;

    use crate::builder::WorkflowBuilder;
    use crate::config::WorkflowConfig;
    use crate::error::{HandlerError, WorkflowError};
    use crate::executor::{execute, Executor, ExecutorOptions};
    use crate::result::StepResult;
    use crate::tests::support::{registry, Params, Scripted};
    use crate::transition::Transition;

    #[tokio::test]
    async fn test_empty_workflow_touches_no_handler() {
        let resolver = registry(vec![("h1", Scripted::success())]);
        let params = Params::new("empty");

        let err = execute(&WorkflowConfig::new(), &resolver, &params).await.unwrap_err();

        assert!(matches!(err, WorkflowError::EmptyWorkflow));
        assert!(err.partial_results().is_none());
        assert!(err.handler().is_none());
        assert!(params.calls().is_empty());
    }

    #[tokio::test]
    async fn test_unresolvable_target_keeps_partial_results() {
        let config = WorkflowBuilder::new()
            .node("h1")
            .on_success("ghost")
            .build();
        let resolver = registry(vec![("h1", Scripted::success())]);
        let params = Params::new("ghost");

        let err = execute(&config, &resolver, &params).await.unwrap_err();

        match &err {
            WorkflowError::HandlerResolution { handler, partial } => {
                assert_eq!(handler.as_str(), "ghost");
                assert_eq!(partial.len(), 1);
                assert!(partial.get("h1").unwrap().is_success());
            }
            other => panic!("expected HandlerResolution, got {other:?}"),
        }
        assert_eq!(err.to_string(), "Cannot resolve handler: ghost");
        assert_eq!(params.calls(), vec!["h1"]);
    }

    #[tokio::test]
    async fn test_unresolvable_first_node() {
        let config = WorkflowBuilder::new().node("missing").build();
        let resolver = registry(vec![("h1", Scripted::success())]);

        let err = execute(&config, &resolver, &Params::new("x")).await.unwrap_err();
        assert!(matches!(err, WorkflowError::HandlerResolution { .. }));
        assert!(err.into_partial_results().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_ambiguous_result_stops_before_next_handler() {
        let config = WorkflowBuilder::new()
            .node("h1")
            .on_success("h2")
            .on_fail("h2")
            .node("h2")
            .build();
        let resolver = registry(vec![
            ("h1", Scripted::always(StepResult::from_status("maybe", json!(null)))),
            ("h2", Scripted::success()),
        ]);
        let params = Params::new("ambiguous");

        let err = execute(&config, &resolver, &params).await.unwrap_err();

        match &err {
            WorkflowError::AmbiguousResult {
                handler,
                status,
                partial,
            } => {
                assert_eq!(handler.as_str(), "h1");
                assert_eq!(status, "maybe");
                assert_eq!(partial.len(), 1);
            }
            other => panic!("expected AmbiguousResult, got {other:?}"),
        }
        assert_eq!(params.calls(), vec!["h1"]);
    }

    #[tokio::test]
    async fn test_handler_fault_is_not_masked() {
        let config = WorkflowBuilder::new()
            .node("h1")
            .on_success("h2")
            .on_error("recover")
            .node("h2")
            .node("recover")
            .build();
        let resolver = registry(vec![
            ("h1", Scripted::success()),
            ("h2", Scripted::erroring(HandlerError::Timeout(Duration::from_secs(3)))),
            ("recover", Scripted::success()),
        ]);
        let params = Params::new("fault");

        let err = execute(&config, &resolver, &params).await.unwrap_err();

        match &err {
            WorkflowError::HandlerExecution { handler, source, partial } => {
                assert_eq!(handler.as_str(), "h2");
                assert_eq!(source, &HandlerError::Timeout(Duration::from_secs(3)));
                assert_eq!(partial.len(), 1);
            }
            other => panic!("expected HandlerExecution, got {other:?}"),
        }
        assert!(std::error::Error::source(&err).is_some());
        assert_eq!(params.calls(), vec!["h1", "h2"]);
    }

    #[tokio::test]
    async fn test_step_limit_stops_endless_retry() {
        let config = WorkflowBuilder::new().node("poll").on_retry("poll").build();
        let resolver = registry(vec![(
            "poll",
            Scripted::always(StepResult::transition(Transition::Retry, json!(null))),
        )]);
        let params = Params::new("loop");
        let executor = Executor::new(&resolver).with_options(ExecutorOptions::new().with_max_steps(5));

        let err = executor.execute(&config, &params).await.unwrap_err();

        match &err {
            WorkflowError::StepLimitExceeded { limit, handler, partial } => {
                assert_eq!(*limit, 5);
                assert_eq!(handler.as_str(), "poll");
                assert_eq!(partial.len(), 5);
                assert_eq!(partial.trail().len(), 5);
            }
            other => panic!("expected StepLimitExceeded, got {other:?}"),
        }
        assert_eq!(params.calls().len(), 5);
    }

    #[tokio::test]
    async fn test_step_limit_not_hit_by_short_run() {
        let config = WorkflowBuilder::new().node("a").on_success("b").node("b").build();
        let resolver = registry(vec![("a", Scripted::success()), ("b", Scripted::success())]);
        let executor = Executor::new(&resolver).with_max_steps(2);

        let run = executor.execute(&config, &Params::new("short")).await.unwrap();
        assert_eq!(run.len(), 2);

        let zero = Executor::new(&resolver).with_max_steps(0);
        let err = zero.execute(&config, &Params::new("zero")).await.unwrap_err();
        assert!(matches!(err, WorkflowError::StepLimitExceeded { limit: 0, .. }));
    }
}
