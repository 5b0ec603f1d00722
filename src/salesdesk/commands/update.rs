use crate::collection::Screen;
use crate::commands::{CmdMessage, CmdResult, FieldAssignment, RecordDetail};
use crate::draft::DraftSession;
use crate::error::Result;
use crate::model::{Entity, RecordId};
use crate::pagination::Pager;
use crate::remote::Remote;
use chrono::NaiveDateTime;

use super::helpers::apply_assignments;

/// Opens an edit draft on record `id`, applies the assignments and sends the result.
pub fn run<S: Screen, R: Remote>(
    remote: &mut R,
    pager: Pager,
    id: RecordId,
    assignments: &[FieldAssignment],
    now: NaiveDateTime,
) -> Result<CmdResult> {
    if assignments.is_empty() {
        let mut result = CmdResult::default();
        result.add_message(CmdMessage::warning("Nothing to update: pass --set field=value"));
        return Ok(result);
    }

    let mut screen = S::with_pager(pager);
    screen.ensure_loaded(remote)?;
    let current = match screen.find(id) {
        Some(record) => record.clone(),
        None => remote.get::<S::Record>(id)?,
    };

    let mut draft = DraftSession::edit(&current, now);
    apply_assignments(&mut draft, assignments)?;
    let record = draft.commit()?;

    let updated = screen.update(remote, id, record)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "{} updated (#{}): {}",
        <S::Record as Entity>::KIND,
        id,
        updated.label()
    )));
    Ok(result.with_record(RecordDetail::of(&updated)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::{CollectionStore, SaleStore};
    use crate::error::DeskError;
    use crate::model::{Customer, EntityKind, Product, Sale};
    use crate::remote::memory::fixtures::RemoteFixture;
    use crate::validation::parse_date;

    fn now() -> NaiveDateTime {
        parse_date("2024-06-01T12:00:00").unwrap()
    }

    #[test]
    fn updates_only_the_given_fields() {
        let mut remote = RemoteFixture::new().with_product("Widget", 3.0).remote;
        let fields = [FieldAssignment::new("price", "4.25")];
        let result =
            run::<CollectionStore<Product>, _>(&mut remote, Pager::default(), 1, &fields, now())
                .unwrap();

        assert_eq!(result.record.unwrap().field("Price"), Some("$4.25"));
        let stored = remote.get::<Product>(1).unwrap();
        assert_eq!(stored.name, "Widget");
        assert_eq!(stored.price, 4.25);
    }

    #[test]
    fn invalid_edit_is_rejected_before_sending() {
        let mut remote = RemoteFixture::new().with_customers(1).remote;
        let fields = [FieldAssignment::new("name", "")];
        let err =
            run::<CollectionStore<Customer>, _>(&mut remote, Pager::default(), 1, &fields, now())
                .unwrap_err();
        assert!(matches!(err, DeskError::ValidationRejected(_)));
        assert_eq!(remote.get::<Customer>(1).unwrap().name, "Customer 1");
    }

    #[test]
    fn missing_record_is_not_found() {
        let mut remote = RemoteFixture::new().with_customers(1).remote;
        let fields = [FieldAssignment::new("name", "Bob")];
        let err =
            run::<CollectionStore<Customer>, _>(&mut remote, Pager::default(), 5, &fields, now())
                .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn empty_update_sends_nothing() {
        let mut remote = RemoteFixture::new().with_customers(1).remote;
        let before = remote.requests();
        let result =
            run::<CollectionStore<Customer>, _>(&mut remote, Pager::default(), 1, &[], now())
                .unwrap();
        assert!(result.messages[0].content.contains("Nothing to update"));
        assert_eq!(remote.requests(), before);
    }

    #[test]
    fn moves_a_sale_to_another_store() {
        let mut remote = RemoteFixture::new()
            .with_customers(1)
            .with_product("Widget", 3.0)
            .with_store("Downtown")
            .with_store("Airport")
            .with_sale(1, 1, 1)
            .remote;
        let fields = [FieldAssignment::new("storeId", "2")];
        run::<SaleStore, _>(&mut remote, Pager::default(), 1, &fields, now()).unwrap();

        let sale = remote.get::<Sale>(1).unwrap();
        assert_eq!(sale.store_id, 2);
        assert_eq!(sale.date_sold, parse_date("2019-08-16").unwrap());
        assert_eq!(remote.sales_view().unwrap()[0].store_name, "Airport");
        assert!(remote.options(EntityKind::Stores).unwrap().len() == 2);
    }
}
