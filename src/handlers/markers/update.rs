use super::*;

pub const COMMAND: &str = "marker.update";

#[derive(Deserialize)]
pub struct Input {
    pub id: String,
    #[serde(flatten)]
    pub patch: MarkerPatch,
}

pub fn guard<S>(ctx: &Context<S>) -> bool {
    ctx.has_field("id")
}

pub fn handle<S: Collections>(ctx: &Context<S>) -> Result<Value, HandlerError> {
    require_role(ctx, WRITE_ROLES)?;
    let input = ctx.input::<Input>()?;
    input.patch.validate()?;

    let markers = ctx.store().collection::<Marker>();
    let (mut records, version) = markers.for_update()?;
    let marker = records
        .iter_mut()
        .find(|m| m.id == input.id)
        .ok_or_else(|| HandlerError::NotFound(input.id.clone()))?;
    input.patch.apply_to(marker);
    let updated = marker.clone();
    markers.store_if(records, version)?;

    Ok(serde_json::to_value(&updated)?)
}
