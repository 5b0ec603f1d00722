use crate::collection::Screen;
use crate::commands::{CmdMessage, CmdResult, FieldAssignment, RecordDetail};
use crate::draft::DraftSession;
use crate::error::{DeskError, Result};
use crate::model::Entity;
use crate::pagination::Pager;
use crate::remote::Remote;
use chrono::NaiveDateTime;

use super::helpers::apply_assignments;

/// Validates the form locally, then sends it. Rejected drafts never reach the remote.
pub fn run<S: Screen, R: Remote>(
    remote: &mut R,
    pager: Pager,
    assignments: &[FieldAssignment],
    now: NaiveDateTime,
) -> Result<CmdResult> {
    let mut draft = DraftSession::<S::Record>::create(now);
    apply_assignments(&mut draft, assignments)?;
    let record = draft.commit()?;

    let mut screen = S::with_pager(pager);
    let created = screen.create(remote, record)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "{} created (#{}): {}",
        <S::Record as Entity>::KIND,
        created.id(),
        created.label()
    )));
    Ok(result
        .with_record(RecordDetail::of(&created))
        .with_table(screen.page_table()))
}

/// Describes a rejected draft field by field.
pub fn rejection_messages(error: &DeskError) -> Vec<CmdMessage> {
    match error {
        DeskError::ValidationRejected(validation) => validation
            .errors()
            .map(|(_, message)| CmdMessage::error(message))
            .collect(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::{CollectionStore, SaleStore};
    use crate::model::{Customer, Product};
    use crate::remote::memory::fixtures::RemoteFixture;
    use crate::remote::memory::InMemoryRemote;
    use crate::validation::parse_date;

    fn now() -> NaiveDateTime {
        parse_date("2024-06-01T12:00:00").unwrap()
    }

    #[test]
    fn creates_customer_and_shows_it_first() {
        let mut remote = RemoteFixture::new().with_customers(6).remote;
        let fields = [
            FieldAssignment::new("name", "Alice"),
            FieldAssignment::new("address", "1 Main St"),
        ];
        let result =
            run::<CollectionStore<Customer>, _>(&mut remote, Pager::default(), &fields, now())
                .unwrap();

        let record = result.record.unwrap();
        assert_eq!(record.id, 7);
        assert_eq!(record.field("Name"), Some("Alice"));
        let table = result.table.unwrap();
        assert_eq!(table.page.current_page, 1);
        assert_eq!(table.rows[0][1], "Alice");
        assert!(result.messages[0].content.contains("Customer created (#7)"));
    }

    #[test]
    fn invalid_draft_makes_no_request() {
        let mut remote = InMemoryRemote::new();
        let fields = [
            FieldAssignment::new("name", "Widget"),
            FieldAssignment::new("price", "-5"),
        ];
        let err = run::<CollectionStore<Product>, _>(&mut remote, Pager::default(), &fields, now())
            .unwrap_err();

        assert!(matches!(err, DeskError::ValidationRejected(_)));
        assert_eq!(remote.requests(), 0);
        let messages = rejection_messages(&err);
        assert_eq!(messages.len(), 1);
        assert!(messages[0].content.contains("positive"));
    }

    #[test]
    fn future_sale_is_rejected_locally() {
        let mut remote = RemoteFixture::new()
            .with_customers(1)
            .with_product("Widget", 3.0)
            .with_store("Downtown")
            .remote;
        let before = remote.requests();
        let fields = [
            FieldAssignment::new("customerId", "1"),
            FieldAssignment::new("productId", "1"),
            FieldAssignment::new("storeId", "1"),
            FieldAssignment::new("dateSold", "2024-06-02"),
        ];
        let err = run::<SaleStore, _>(&mut remote, Pager::default(), &fields, now()).unwrap_err();
        assert!(matches!(err, DeskError::ValidationRejected(_)));
        assert_eq!(remote.requests(), before);
    }

    #[test]
    fn creates_sale_and_lists_the_view() {
        let mut remote = RemoteFixture::new()
            .with_customers(1)
            .with_product("Widget", 3.0)
            .with_store("Downtown")
            .remote;
        let fields = [
            FieldAssignment::new("customerId", "1"),
            FieldAssignment::new("productId", "1"),
            FieldAssignment::new("storeId", "1"),
            FieldAssignment::new("dateSold", "2024-06-01"),
        ];
        let result = run::<SaleStore, _>(&mut remote, Pager::default(), &fields, now()).unwrap();
        let table = result.table.unwrap();
        assert_eq!(
            table.rows[0],
            vec!["1", "Customer 1", "Widget", "Downtown", "01 Jun 2024"]
        );
    }
}
