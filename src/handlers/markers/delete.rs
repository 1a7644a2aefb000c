use super::*;

pub const COMMAND: &str = "marker.delete";

#[derive(Deserialize)]
pub struct Input {
    pub id: String,
}

pub fn guard<S>(ctx: &Context<S>) -> bool {
    ctx.has_field("id")
}

pub fn handle<S: Collections>(ctx: &Context<S>) -> Result<Value, HandlerError> {
    require_role(ctx, WRITE_ROLES)?;
    let input = ctx.input::<Input>()?;

    let markers = ctx.store().collection::<Marker>();
    let (mut records, version) = markers.for_update()?;
    let before = records.len();
    records.retain(|m| m.id != input.id);
    if records.len() == before {
        return Err(HandlerError::NotFound(input.id));
    }
    markers.store_if(records, version)?;

    Ok(json!({ "deleted": input.id }))
}
