use super::*;

pub const COMMAND: &str = "evacuation.update";

#[derive(Deserialize)]
pub struct Input {
    pub id: String,
    #[serde(flatten)]
    pub patch: EvacuationPatch,
}

pub fn guard<S>(ctx: &Context<S>) -> bool {
    ctx.has_field("id")
}

pub fn handle<S: Collections>(ctx: &Context<S>) -> Result<Value, HandlerError> {
    require_role(ctx, ADMIN_ONLY)?;
    let input = ctx.input::<Input>()?;
    input.patch.validate()?;

    let centers = ctx.store().collection::<EvacuationCenter>();
    let (mut records, version) = centers.for_update()?;
    let center = records
        .iter_mut()
        .find(|c| c.id == input.id)
        .ok_or_else(|| HandlerError::NotFound(input.id.clone()))?;
    input.patch.apply_to(center);
    let updated = center.clone();
    centers.store_if(records, version)?;

    Ok(serde_json::to_value(&updated)?)
}
