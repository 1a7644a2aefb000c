use super::*;

pub const COMMAND: &str = "marker.create";

pub fn guard<S>(ctx: &Context<S>) -> bool {
    ctx.has_fields(&["category", "name", "latitude", "longitude"])
}

pub fn handle<S: Collections>(ctx: &Context<S>) -> Result<Value, HandlerError> {
    require_role(ctx, WRITE_ROLES)?;
    let input = ctx.input::<NewMarker>()?;
    input.validate()?;

    let reporter = ctx.user_id()?.to_string();
    let marker = input.into_record(mint_id("mkr"), Some(reporter));

    let markers = ctx.store().collection::<Marker>();
    let (mut records, version) = markers.for_update()?;
    // newest first, matching the optimistic create policy on clients
    records.insert(0, marker.clone());
    markers.store_if(records, version)?;

    Ok(serde_json::to_value(&marker)?)
}
