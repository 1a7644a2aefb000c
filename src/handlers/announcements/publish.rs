use super::*;

pub const COMMAND: &str = "announcement.publish";

pub fn guard<S>(ctx: &Context<S>) -> bool {
    ctx.has_fields(&["title", "body", "audience"])
}

pub fn handle<S: Collections>(ctx: &Context<S>) -> Result<Value, HandlerError> {
    require_role(ctx, ADMIN_ONLY)?;
    let input = ctx.input::<NewAnnouncement>()?;
    input.validate()?;

    let poster = ctx.user_id()?.to_string();
    let announcement = input.into_record(mint_id("ann"), poster);

    let announcements = ctx.store().collection::<Announcement>();
    let (mut records, version) = announcements.for_update()?;
    records.insert(0, announcement.clone());
    announcements.store_if(records, version)?;

    Ok(serde_json::to_value(&announcement)?)
}
