use super::*;

pub const COMMAND: &str = "report.list";

pub fn guard<S>(_ctx: &Context<S>) -> bool {
    true
}

pub fn handle<S: Collections>(ctx: &Context<S>) -> Result<Value, HandlerError> {
    ctx.user_id()?;
    let reports = ctx.store().collection::<Report>().records()?;
    Ok(json!({ "reports": reports }))
}
