use super::*;

pub const COMMAND: &str = "marker.list";

pub fn guard<S>(_ctx: &Context<S>) -> bool {
    true
}

pub fn handle<S: Collections>(ctx: &Context<S>) -> Result<Value, HandlerError> {
    ctx.user_id()?;
    let markers = ctx.store().collection::<Marker>().records()?;
    Ok(json!({ "markers": markers }))
}
