use super::*;

pub const COMMAND: &str = "evacuation.delete";

#[derive(Deserialize)]
pub struct Input {
    pub id: String,
}

pub fn guard<S>(ctx: &Context<S>) -> bool {
    ctx.has_field("id")
}

pub fn handle<S: Collections>(ctx: &Context<S>) -> Result<Value, HandlerError> {
    require_role(ctx, ADMIN_ONLY)?;
    let input = ctx.input::<Input>()?;

    let centers = ctx.store().collection::<EvacuationCenter>();
    let (mut records, version) = centers.for_update()?;
    let before = records.len();
    records.retain(|c| c.id != input.id);
    if records.len() == before {
        return Err(HandlerError::NotFound(input.id));
    }
    centers.store_if(records, version)?;

    Ok(json!({ "deleted": input.id }))
}
