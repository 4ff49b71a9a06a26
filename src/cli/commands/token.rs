use anyhow::Context;

use crate::auth::{generate_jwt, Claims};
use crate::config;
use crate::types::RecordId;

pub fn handle(user_id: &str, hours: Option<u64>) -> anyhow::Result<()> {
    let config = config::config();
    config.check().map_err(anyhow::Error::msg)?;

    let id = RecordId::parse(user_id)
        .with_context(|| format!("'{}' is not a valid user id", user_id))?;

    let claims = match hours {
        Some(hours) => Claims::with_expiry(&id, hours),
        None => Claims::new(&id),
    };
    let token = generate_jwt(&claims)?;

    println!("{}", token);
    Ok(())
}
