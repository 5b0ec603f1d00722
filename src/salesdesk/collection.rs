//! # Collection Stores
//!
//! A [`CollectionStore`] is the client-side mirror of one remote resource for the
//! lifetime of a screen. It owns the ordered record list and the table's [`Pager`];
//! nothing outside the store mutates either.
//!
//! ## Phases
//!
//! A store starts **unloaded**. The first operation (or an explicit
//! [`CollectionStore::refresh`]) fetches the full list and moves it to **loaded**.
//!
//! ## Ordering
//!
//! The list is kept most recent first. The backend assigns ids in increasing
//! order, so refreshes sort by descending id rather than trusting the position in
//! the server's response. Creates prepend, updates replace in place.
//!
//! ## Failure Behaviour
//!
//! A failed operation leaves the list as it was. The exception is
//! [`DeskError::NotFound`] from update or delete: the record vanished remotely, so
//! the store refreshes to reconcile before returning the error.
//!
//! [`SaleStore`] wraps the sales collection together with its denormalised view
//! and the option lists its form needs.

use crate::error::{DeskError, Result};
use crate::model::{Entity, EntityKind, RecordId, Sale, SaleView, SelectOption};
use crate::pagination::{PageView, Pager};
use crate::remote::Remote;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Unloaded,
    Loaded,
}

#[derive(Debug, Clone)]
pub struct CollectionStore<E: Entity> {
    records: Vec<E>,
    phase: Phase,
    pager: Pager,
}

impl<E: Entity> Default for CollectionStore<E> {
    fn default() -> Self {
        Self::new(Pager::default())
    }
}

impl<E: Entity> CollectionStore<E> {
    pub fn new(pager: Pager) -> Self {
        Self {
            records: Vec::new(),
            phase: Phase::Unloaded,
            pager,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_loaded(&self) -> bool {
        self.phase == Phase::Loaded
    }

    pub fn records(&self) -> &[E] {
        &self.records
    }

    pub fn find(&self, id: RecordId) -> Option<&E> {
        self.records.iter().find(|r| r.id() == id)
    }

    pub fn pager(&self) -> &Pager {
        &self.pager
    }

    pub fn pager_mut(&mut self) -> &mut Pager {
        &mut self.pager
    }

    pub fn page_view(&self) -> PageView {
        self.pager.view(self.records.len())
    }

    /// Records on the current page.
    pub fn page(&self) -> &[E] {
        self.pager.slice(&self.records)
    }

    /// Loads the list on first use.
    pub fn ensure_loaded<R: Remote>(&mut self, remote: &R) -> Result<()> {
        if !self.is_loaded() {
            self.refresh(remote)?;
        }
        Ok(())
    }

    /// Replaces the list with the remote's current records, newest first.
    pub fn refresh<R: Remote>(&mut self, remote: &R) -> Result<()> {
        let mut records = remote.list::<E>()?;
        records.sort_by_key(|r| std::cmp::Reverse(r.id()));
        debug!(resource = E::KIND.resource(), count = records.len(), "refreshed");
        self.records = records;
        self.phase = Phase::Loaded;
        Ok(())
    }

    pub fn create<R: Remote>(&mut self, remote: &mut R, draft: E) -> Result<E> {
        self.ensure_loaded(remote)?;
        let created = remote.create(&draft)?;
        info!(resource = E::KIND.resource(), id = created.id(), "created");
        self.records.insert(0, created.clone());
        self.pager.reset();
        Ok(created)
    }

    /// Sends `draft` as the new state of record `id`.
    pub fn update<R: Remote>(&mut self, remote: &mut R, id: RecordId, draft: E) -> Result<E> {
        self.ensure_loaded(remote)?;
        let mut record = draft;
        record.set_id(id);

        if let Err(e) = remote.update(id, &record) {
            return Err(self.reconcile(remote, e));
        }
        info!(resource = E::KIND.resource(), id, "updated");

        match self.records.iter_mut().find(|r| r.id() == id) {
            Some(slot) => *slot = record.clone(),
            None => self.records.insert(0, record.clone()),
        }
        Ok(record)
    }

    pub fn delete<R: Remote>(&mut self, remote: &mut R, id: RecordId) -> Result<E> {
        self.ensure_loaded(remote)?;
        let deleted = match remote.delete::<E>(id) {
            Ok(deleted) => deleted,
            Err(e) => return Err(self.reconcile(remote, e)),
        };
        info!(resource = E::KIND.resource(), id, "deleted");

        self.records.retain(|r| r.id() != deleted.id());
        let total = self.records.len();
        let page = self.pager.current_page();
        self.pager.go_to(page, total);
        Ok(deleted)
    }

    /// Refreshes after a `NotFound` so the list stops showing the missing record.
    fn reconcile<R: Remote>(&mut self, remote: &R, error: DeskError) -> DeskError {
        if error.is_not_found() {
            warn!(resource = E::KIND.resource(), %error, "record vanished, refreshing");
            if let Err(refresh_error) = self.refresh(remote) {
                warn!(%refresh_error, "refresh after missing record failed");
            }
        }
        error
    }
}

/// Option lists for the three foreign keys of a sale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaleOptions {
    pub customers: Vec<SelectOption>,
    pub products: Vec<SelectOption>,
    pub stores: Vec<SelectOption>,
}

impl SaleOptions {
    pub fn for_kind(&self, kind: EntityKind) -> &[SelectOption] {
        match kind {
            EntityKind::Customers => &self.customers,
            EntityKind::Products => &self.products,
            EntityKind::Stores => &self.stores,
            EntityKind::Sales => &[],
        }
    }
}

/// Sales collection plus the read-only view rows shown in its table.
///
/// The table paginates over the view, so the pager lives here rather than in
/// the inner store.
#[derive(Debug, Clone, Default)]
pub struct SaleStore {
    sales: CollectionStore<Sale>,
    view: Vec<SaleView>,
    options: SaleOptions,
    pager: Pager,
}

impl SaleStore {
    pub fn new(pager: Pager) -> Self {
        Self {
            sales: CollectionStore::new(pager),
            view: Vec::new(),
            options: SaleOptions::default(),
            pager,
        }
    }

    pub fn sales(&self) -> &CollectionStore<Sale> {
        &self.sales
    }

    pub fn view(&self) -> &[SaleView] {
        &self.view
    }

    pub fn options(&self) -> &SaleOptions {
        &self.options
    }

    pub fn pager_mut(&mut self) -> &mut Pager {
        &mut self.pager
    }

    pub fn page_view(&self) -> PageView {
        self.pager.view(self.view.len())
    }

    pub fn page(&self) -> &[SaleView] {
        self.pager.slice(&self.view)
    }

    /// Loads sales, their view rows and the option lists.
    pub fn refresh<R: Remote>(&mut self, remote: &R) -> Result<()> {
        self.sales.refresh(remote)?;
        self.refresh_view(remote)?;
        self.refresh_options(remote)
    }

    pub fn ensure_loaded<R: Remote>(&mut self, remote: &R) -> Result<()> {
        if !self.sales.is_loaded() {
            self.refresh(remote)?;
        }
        Ok(())
    }

    /// Re-fetches the denormalised rows, newest first.
    pub fn refresh_view<R: Remote>(&mut self, remote: &R) -> Result<()> {
        let mut view = remote.sales_view()?;
        view.sort_by_key(|v| std::cmp::Reverse(v.id));
        self.view = view;
        let total = self.view.len();
        let page = self.pager.current_page();
        self.pager.go_to(page, total);
        Ok(())
    }

    pub fn refresh_options<R: Remote>(&mut self, remote: &R) -> Result<()> {
        self.options = SaleOptions {
            customers: remote.options(EntityKind::Customers)?,
            products: remote.options(EntityKind::Products)?,
            stores: remote.options(EntityKind::Stores)?,
        };
        Ok(())
    }

    pub fn create<R: Remote>(&mut self, remote: &mut R, draft: Sale) -> Result<Sale> {
        self.ensure_loaded(remote)?;
        let created = self.sales.create(remote, draft)?;
        self.pager.reset();
        self.refresh_view_after(remote, Ok(created))
    }

    pub fn update<R: Remote>(&mut self, remote: &mut R, id: RecordId, draft: Sale) -> Result<Sale> {
        self.ensure_loaded(remote)?;
        let result = self.sales.update(remote, id, draft);
        self.refresh_view_after(remote, result)
    }

    pub fn delete<R: Remote>(&mut self, remote: &mut R, id: RecordId) -> Result<Sale> {
        self.ensure_loaded(remote)?;
        let result = self.sales.delete(remote, id);
        self.refresh_view_after(remote, result)
    }

    /// Keeps the view in line with the list after a mutation, including a
    /// `NotFound` that already reconciled the list.
    ///
    /// The mutation's own outcome is what gets returned. A view refresh that
    /// fails after a committed write leaves the view stale until the next
    /// refresh.
    fn refresh_view_after<R: Remote>(&mut self, remote: &R, result: Result<Sale>) -> Result<Sale> {
        match result {
            Err(e) if !e.is_not_found() => Err(e),
            result => {
                if let Err(view_error) = self.refresh_view(remote) {
                    warn!(%view_error, "sales view refresh failed, view is stale");
                }
                result
            }
        }
    }
}

/// One page of a screen's table, ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageTable {
    pub columns: &'static [&'static str],
    pub rows: Vec<Vec<String>>,
    pub page: PageView,
}

/// The state behind one record screen: a collection, its pager, and whatever
/// read models its table needs.
pub trait Screen {
    type Record: Entity;

    fn with_pager(pager: Pager) -> Self;

    fn ensure_loaded<R: Remote>(&mut self, remote: &R) -> Result<()>;

    fn find(&self, id: RecordId) -> Option<&Self::Record>;

    fn pager_mut(&mut self) -> &mut Pager;

    fn create<R: Remote>(&mut self, remote: &mut R, draft: Self::Record) -> Result<Self::Record>;

    fn update<R: Remote>(
        &mut self,
        remote: &mut R,
        id: RecordId,
        draft: Self::Record,
    ) -> Result<Self::Record>;

    fn delete<R: Remote>(&mut self, remote: &mut R, id: RecordId) -> Result<Self::Record>;

    /// Number of rows the table paginates over.
    fn total_rows(&self) -> usize;

    fn page_table(&self) -> PageTable;
}

impl<E: Entity> Screen for CollectionStore<E> {
    type Record = E;

    fn with_pager(pager: Pager) -> Self {
        CollectionStore::new(pager)
    }

    fn ensure_loaded<R: Remote>(&mut self, remote: &R) -> Result<()> {
        CollectionStore::ensure_loaded(self, remote)
    }

    fn find(&self, id: RecordId) -> Option<&E> {
        CollectionStore::find(self, id)
    }

    fn pager_mut(&mut self) -> &mut Pager {
        CollectionStore::pager_mut(self)
    }

    fn create<R: Remote>(&mut self, remote: &mut R, draft: E) -> Result<E> {
        CollectionStore::create(self, remote, draft)
    }

    fn update<R: Remote>(&mut self, remote: &mut R, id: RecordId, draft: E) -> Result<E> {
        CollectionStore::update(self, remote, id, draft)
    }

    fn delete<R: Remote>(&mut self, remote: &mut R, id: RecordId) -> Result<E> {
        CollectionStore::delete(self, remote, id)
    }

    fn total_rows(&self) -> usize {
        self.records.len()
    }

    fn page_table(&self) -> PageTable {
        PageTable {
            columns: E::COLUMNS,
            rows: self.page().iter().map(Entity::cells).collect(),
            page: self.page_view(),
        }
    }
}

impl Screen for SaleStore {
    type Record = Sale;

    fn with_pager(pager: Pager) -> Self {
        SaleStore::new(pager)
    }

    fn ensure_loaded<R: Remote>(&mut self, remote: &R) -> Result<()> {
        SaleStore::ensure_loaded(self, remote)
    }

    fn find(&self, id: RecordId) -> Option<&Sale> {
        self.sales.find(id)
    }

    fn pager_mut(&mut self) -> &mut Pager {
        SaleStore::pager_mut(self)
    }

    fn create<R: Remote>(&mut self, remote: &mut R, draft: Sale) -> Result<Sale> {
        SaleStore::create(self, remote, draft)
    }

    fn update<R: Remote>(&mut self, remote: &mut R, id: RecordId, draft: Sale) -> Result<Sale> {
        SaleStore::update(self, remote, id, draft)
    }

    fn delete<R: Remote>(&mut self, remote: &mut R, id: RecordId) -> Result<Sale> {
        SaleStore::delete(self, remote, id)
    }

    fn total_rows(&self) -> usize {
        self.view.len()
    }

    fn page_table(&self) -> PageTable {
        PageTable {
            columns: SaleView::COLUMNS,
            rows: self.page().iter().map(SaleView::cells).collect(),
            page: self.page_view(),
        }
    }
}
