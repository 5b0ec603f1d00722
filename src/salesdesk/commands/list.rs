use crate::collection::Screen;
use crate::commands::{CmdMessage, CmdResult, ListRequest};
use crate::error::Result;
use crate::model::Entity;
use crate::pagination::Pager;
use crate::remote::Remote;

pub fn run<S: Screen, R: Remote>(remote: &R, pager: Pager, request: ListRequest) -> Result<CmdResult> {
    let mut screen = S::with_pager(pager);
    screen.ensure_loaded(remote)?;

    let total = screen.total_rows();
    if let Some(size) = request.page_size {
        screen.pager_mut().set_page_size(size);
    }
    if let Some(page) = request.page {
        screen.pager_mut().go_to(page, total);
    }

    let table = screen.page_table();
    let mut result = CmdResult::default();
    if let Some(requested) = request.page {
        if requested != table.page.current_page && total > 0 {
            result.add_message(CmdMessage::warning(format!(
                "Page {} does not exist, showing page {} of {}",
                requested, table.page.current_page, table.page.page_count
            )));
        }
    }
    if total == 0 {
        result.add_message(CmdMessage::info(format!(
            "No {} records yet.",
            <S::Record as Entity>::KIND.singular().to_lowercase()
        )));
    }
    Ok(result.with_table(table))
}
