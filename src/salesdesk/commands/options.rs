use crate::commands::{CmdMessage, CmdResult};
use crate::error::{DeskError, Result};
use crate::model::EntityKind;
use crate::remote::Remote;

/// Lists `{key, value, text}` entries used to pick a record in a sale form.
pub fn run<R: Remote>(remote: &R, kind: EntityKind) -> Result<CmdResult> {
    if !kind.has_options() {
        return Err(DeskError::Api(format!(
            "{} records are not offered as options",
            kind
        )));
    }

    let options = remote.options(kind)?;
    let mut result = CmdResult::default();
    if options.is_empty() {
        result.add_message(CmdMessage::info(format!(
            "No {} records to choose from.",
            kind.singular().to_lowercase()
        )));
    }
    Ok(result.with_options(options))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::memory::fixtures::RemoteFixture;

    #[test]
    fn lists_options_in_id_order() {
        let remote = RemoteFixture::new()
            .with_product("Widget", 1.0)
            .with_product("Gadget", 2.0)
            .remote;
        let result = run(&remote, EntityKind::Products).unwrap();
        let texts: Vec<_> = result.options.iter().map(|o| o.text.as_str()).collect();
        assert_eq!(texts, vec!["Widget", "Gadget"]);
        assert_eq!(result.options[1].key, 2);
        assert_eq!(result.options[1].value, 2);
    }

    #[test]
    fn sales_have_no_options() {
        let remote = RemoteFixture::new().remote;
        let before = remote.requests();
        assert!(run(&remote, EntityKind::Sales).is_err());
        assert_eq!(remote.requests(), before);
    }
}
