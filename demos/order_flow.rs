// demos/order_flow.rs
use async_trait::async_trait;
use routeflow::*;
use serde_json::json;

/// Order being processed; shared by every handler in the run.
#[derive(Clone, Debug)]
pub struct Order {
    pub id: u32,
    pub amount: u64,
    pub in_stock: bool,
}

/// Charges the order; declines anything over the card limit.
pub struct Payment {
    limit: u64,
}

#[async_trait]
impl Handler<Order> for Payment {
    async fn handle(&self, ctx: &RunCtx<'_, Order>) -> Result<StepResult, HandlerError> {
        let order = ctx.params();
        if order.amount > self.limit {
            println!("Payment: order {} declined ({} > {})", order.id, order.amount, self.limit);
            Ok(StepResult::fail(json!({"reason": "limit"})))
        } else {
            println!("Payment: order {} charged {}", order.id, order.amount);
            Ok(StepResult::success(json!({"charged": order.amount})))
        }
    }
}

/// Ships in-stock orders; parks the rest as pending.
pub struct Shipping;

#[async_trait]
impl Handler<Order> for Shipping {
    async fn handle(&self, ctx: &RunCtx<'_, Order>) -> Result<StepResult, HandlerError> {
        if ctx.params().in_stock {
            println!("Shipping: order {} shipped", ctx.params().id);
            Ok(StepResult::success(json!("shipped")))
        } else {
            println!("Shipping: order {} back-ordered", ctx.params().id);
            Ok(StepResult::transition(Transition::Pending, json!("back-ordered")))
        }
    }
}

/// Sends a message describing what happened so far.
pub struct Notify;

#[async_trait]
impl Handler<Order> for Notify {
    async fn handle(&self, ctx: &RunCtx<'_, Order>) -> Result<StepResult, HandlerError> {
        let steps: Vec<String> = ctx.results().handlers().iter().map(|h| h.to_string()).collect();
        println!("Notify: order {} after {:?}", ctx.params().id, steps);
        Ok(StepResult::success(json!({"notified": steps.len()})))
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    routeflow::init();

    let payment = HandlerId::of::<Payment>();
    let shipping = HandlerId::of::<Shipping>();
    let notify = HandlerId::of::<Notify>();

    let config = WorkflowBuilder::new()
        .node(&payment)
            .on_success(&shipping)
            .on_fail(&notify)
        .node(&shipping)
            .on_pending(&notify)
            .terminate_on(Transition::Success)
        .node(&notify)
        .build();

    println!("{}", config.to_dot("orders"));

    let handlers = HandlerRegistry::new()
        .with(&payment, Payment { limit: 500 })
        .with(&shipping, Shipping)
        .with(&notify, Notify);
    let executor = Executor::new(handlers);

    let orders = [
        Order { id: 1, amount: 120, in_stock: true },
        Order { id: 2, amount: 900, in_stock: true },
        Order { id: 3, amount: 80, in_stock: false },
    ];
    for order in &orders {
        let run = executor.execute(&config, order).await?;
        let path: Vec<String> = run.visits().iter().map(|v| format!("{}={}", v.handler, v.result.status())).collect();
        println!("order {} -> {}", order.id, path.join(" -> "));
    }
    Ok(())
}
