use super::*;

pub const COMMAND: &str = "barangay.list";

pub fn guard<S>(_ctx: &Context<S>) -> bool {
    true
}

pub fn handle<S: Collections>(ctx: &Context<S>) -> Result<Value, HandlerError> {
    ctx.user_id()?;
    let barangays = ctx.store().collection::<Barangay>().records()?;
    Ok(json!({ "barangays": barangays }))
}
