//! In-memory fakes for the scheduler tests.
//!
//! The fakes apply the same transition validation as the Postgres
//! implementations and record every call, so tests can assert both the
//! resulting state and the exact traffic a pass produced.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use perangkat_core::delegate::{GenerationOrchestrator, StructureGenerator};
use perangkat_core::master::{Bab, GenerationStatus, Master};
use perangkat_core::status::{DocKind, GenerateStatus};
use perangkat_core::store::{GenerationStore, MasterStore};
use perangkat_core::{Error, ResourceId, Result};

pub struct FakeMasterStore {
    masters: Mutex<Vec<Master>>,
    babs: Mutex<HashMap<ResourceId, Vec<Bab>>>,
    transitions: Mutex<Vec<(ResourceId, GenerateStatus, GenerateStatus)>>,
    pool_queries: AtomicUsize,
}

impl FakeMasterStore {
    pub fn with_masters(masters: Vec<Master>) -> Self {
        Self {
            masters: Mutex::new(masters),
            babs: Mutex::new(HashMap::new()),
            transitions: Mutex::new(Vec::new()),
            pool_queries: AtomicUsize::new(0),
        }
    }

    pub fn master(status: GenerateStatus, percobaan: i32) -> Master {
        Self::master_at(status, percobaan, 0)
    }

    /// A master whose last transition happened `minutes_ago` minutes ago.
    pub fn master_at(status: GenerateStatus, percobaan: i32, minutes_ago: i64) -> Master {
        Master {
            id: ResourceId::new(),
            generate_status: status,
            generate_updated_at: Utc::now() - chrono::Duration::minutes(minutes_ago),
            percobaan,
        }
    }

    /// Attach `count` babs (nomor 1..=count) to a master, returning their ids.
    pub fn add_babs(&self, master_id: ResourceId, count: i32) -> Vec<ResourceId> {
        let babs: Vec<Bab> = (1..=count)
            .map(|nomor| Bab {
                id: ResourceId::new(),
                master_id,
                nomor,
                judul: format!("Bab {nomor}"),
            })
            .collect();
        let ids = babs.iter().map(|bab| bab.id).collect();
        self.babs.lock().unwrap().insert(master_id, babs);
        ids
    }

    pub fn transitions(&self) -> Vec<(ResourceId, GenerateStatus, GenerateStatus)> {
        self.transitions.lock().unwrap().clone()
    }

    pub fn status_of(&self, id: ResourceId) -> Option<GenerateStatus> {
        self.masters
            .lock()
            .unwrap()
            .iter()
            .find(|master| master.id == id)
            .map(|master| master.generate_status)
    }

    pub fn pool_queries(&self) -> usize {
        self.pool_queries.load(Ordering::SeqCst)
    }

    fn sorted_filtered(
        &self,
        limit: i64,
        predicate: impl Fn(&Master) -> bool,
    ) -> Vec<Master> {
        self.pool_queries.fetch_add(1, Ordering::SeqCst);
        let mut matched: Vec<Master> = self
            .masters
            .lock()
            .unwrap()
            .iter()
            .filter(|master| predicate(master))
            .cloned()
            .collect();
        matched.sort_by_key(|master| master.generate_updated_at);
        matched.truncate(limit.max(0) as usize);
        matched
    }
}

#[async_trait]
impl MasterStore for FakeMasterStore {
    async fn get(&self, id: ResourceId) -> Result<Master> {
        self.masters
            .lock()
            .unwrap()
            .iter()
            .find(|master| master.id == id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("master {id}")))
    }

    async fn count_running(&self) -> Result<i64> {
        let count = self
            .masters
            .lock()
            .unwrap()
            .iter()
            .filter(|master| master.generate_status.is_running())
            .count();
        Ok(count as i64)
    }

    async fn list_awaiting_sync(&self, limit: i64) -> Result<Vec<Master>> {
        Ok(self.sorted_filtered(limit, |master| {
            master.generate_status == GenerateStatus::BelumSiap
        }))
    }

    async fn list_ready_to_orchestrate(&self, limit: i64) -> Result<Vec<Master>> {
        Ok(self.sorted_filtered(limit, |master| {
            matches!(
                master.generate_status,
                GenerateStatus::BelumMulai | GenerateStatus::Menunggu
            )
        }))
    }

    async fn list_stale_running(
        &self,
        older_than: DateTime<Utc>,
        limit: i64,
    ) -> Result<Vec<Master>> {
        Ok(self.sorted_filtered(limit, |master| {
            master.generate_status.is_running() && master.generate_updated_at < older_than
        }))
    }

    async fn transition(
        &self,
        id: ResourceId,
        from: GenerateStatus,
        to: GenerateStatus,
    ) -> Result<()> {
        from.validate_transition(to)?;
        let mut masters = self.masters.lock().unwrap();
        let master = masters
            .iter_mut()
            .find(|master| master.id == id)
            .ok_or_else(|| Error::NotFound(format!("master {id}")))?;
        master.generate_status = to;
        master.generate_updated_at = Utc::now();
        self.transitions.lock().unwrap().push((id, from, to));
        Ok(())
    }

    async fn list_babs(&self, master_id: ResourceId) -> Result<Vec<Bab>> {
        Ok(self
            .babs
            .lock()
            .unwrap()
            .get(&master_id)
            .cloned()
            .unwrap_or_default())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenCall {
    Init(ResourceId),
    SyncProgress(ResourceId),
    Finalize(ResourceId),
}

pub struct FakeGenerationStore {
    calls: Mutex<Vec<GenCall>>,
    babs: HashMap<ResourceId, Vec<ResourceId>>,
    rows: Mutex<HashSet<(ResourceId, DocKind, Option<ResourceId>)>>,
}

impl FakeGenerationStore {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            babs: HashMap::new(),
            rows: Mutex::new(HashSet::new()),
        }
    }

    /// A store that knows a master's babs, so `init_for_master` can build
    /// the expected row set the way the stored procedure would.
    pub fn with_babs(master_id: ResourceId, babs: Vec<ResourceId>) -> Self {
        let mut store = Self::new();
        store.babs.insert(master_id, babs);
        store
    }

    pub fn calls(&self) -> Vec<GenCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn row_keys(&self) -> HashSet<(ResourceId, DocKind, Option<ResourceId>)> {
        self.rows.lock().unwrap().clone()
    }
}

#[async_trait]
impl GenerationStore for FakeGenerationStore {
    async fn init_for_master(&self, master_id: ResourceId) -> Result<()> {
        self.calls.lock().unwrap().push(GenCall::Init(master_id));
        let mut rows = self.rows.lock().unwrap();
        rows.insert((master_id, DocKind::Prota, None));
        rows.insert((master_id, DocKind::Prosem, None));
        for bab_id in self.babs.get(&master_id).into_iter().flatten() {
            rows.insert((master_id, DocKind::Rpm, Some(*bab_id)));
            rows.insert((master_id, DocKind::Lkpd, Some(*bab_id)));
        }
        Ok(())
    }

    async fn sync_progress(&self, master_id: ResourceId) -> Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push(GenCall::SyncProgress(master_id));
        Ok(())
    }

    async fn finalize_after_sync(&self, master_id: ResourceId) -> Result<()> {
        self.calls.lock().unwrap().push(GenCall::Finalize(master_id));
        Ok(())
    }

    async fn list_for_master(&self, _master_id: ResourceId) -> Result<Vec<GenerationStatus>> {
        Ok(Vec::new())
    }
}

pub struct FakeStructureGenerator {
    calls: Mutex<Vec<ResourceId>>,
    fail_on: Option<ResourceId>,
}

impl FakeStructureGenerator {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail_on: None,
        }
    }

    pub fn failing_on(bab_id: ResourceId) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail_on: Some(bab_id),
        }
    }

    pub fn calls(&self) -> Vec<ResourceId> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl StructureGenerator for FakeStructureGenerator {
    async fn generate_structure(&self, bab_id: ResourceId) -> Result<()> {
        self.calls.lock().unwrap().push(bab_id);
        if self.fail_on == Some(bab_id) {
            return Err(Error::Remote(format!(
                "structure generation failed for bab {bab_id}"
            )));
        }
        Ok(())
    }
}

pub struct FakeOrchestrator {
    calls: Mutex<Vec<ResourceId>>,
    fail_for: HashSet<ResourceId>,
}

impl FakeOrchestrator {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail_for: HashSet::new(),
        }
    }

    pub fn failing_for(ids: impl IntoIterator<Item = ResourceId>) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail_for: ids.into_iter().collect(),
        }
    }

    pub fn calls(&self) -> Vec<ResourceId> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl GenerationOrchestrator for FakeOrchestrator {
    async fn orchestrate(&self, master_id: ResourceId) -> Result<()> {
        self.calls.lock().unwrap().push(master_id);
        if self.fail_for.contains(&master_id) {
            return Err(Error::Remote(format!(
                "Orchestrator error: 500 boom for {master_id}"
            )));
        }
        Ok(())
    }
}
