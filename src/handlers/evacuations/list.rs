use super::*;

pub const COMMAND: &str = "evacuation.list";

pub fn guard<S>(_ctx: &Context<S>) -> bool {
    true
}

pub fn handle<S: Collections>(ctx: &Context<S>) -> Result<Value, HandlerError> {
    ctx.user_id()?;
    let centers = ctx.store().collection::<EvacuationCenter>().records()?;
    Ok(json!({ "evacuations": centers }))
}
