//! Implementation slots
//!
//! Template references used for future deployments. Reassigning a slot never
//! touches pools already deployed from it.

use crate::error::{NotFoundError, Result};
use factory_types::Address;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Which template family a slot belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SlotKind {
    PlainPool,
    MetaPool,
    Math,
    Gauge,
    Views,
}

impl SlotKind {
    /// Indexed families; the other kinds always use index 0
    pub fn is_indexed(self) -> bool {
        matches!(self, SlotKind::PlainPool | SlotKind::MetaPool)
    }
}

impl fmt::Display for SlotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SlotKind::PlainPool => "plain pool",
            SlotKind::MetaPool => "metapool",
            SlotKind::Math => "math",
            SlotKind::Gauge => "gauge",
            SlotKind::Views => "views",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImplementationSlots {
    plain: BTreeMap<u64, Address>,
    meta: BTreeMap<u64, Address>,
    math: Option<Address>,
    gauge: Option<Address>,
    views: Option<Address>,
}

impl ImplementationSlots {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current template for a slot; `index` is ignored for unindexed kinds
    pub fn get(&self, kind: SlotKind, index: u64) -> Option<Address> {
        match kind {
            SlotKind::PlainPool => self.plain.get(&index).copied(),
            SlotKind::MetaPool => self.meta.get(&index).copied(),
            SlotKind::Math => self.math,
            SlotKind::Gauge => self.gauge,
            SlotKind::Views => self.views,
        }
    }

    /// Assign or clear a slot. A zero address clears it.
    pub fn set(&mut self, kind: SlotKind, index: u64, template: Option<Address>) {
        let template = template.filter(|address| !address.is_zero());
        match kind {
            SlotKind::PlainPool => set_indexed(&mut self.plain, index, template),
            SlotKind::MetaPool => set_indexed(&mut self.meta, index, template),
            SlotKind::Math => self.math = template,
            SlotKind::Gauge => self.gauge = template,
            SlotKind::Views => self.views = template,
        }
    }

    /// Template for a slot, failing with `NotFound` when empty
    pub fn resolve(&self, kind: SlotKind, index: u64) -> Result<Address> {
        self.get(kind, index)
            .ok_or_else(|| NotFoundError::Implementation { kind, index }.into())
    }

    pub fn plain_pool(&self, index: u64) -> Option<Address> {
        self.get(SlotKind::PlainPool, index)
    }

    pub fn metapool(&self, index: u64) -> Option<Address> {
        self.get(SlotKind::MetaPool, index)
    }

    pub fn math(&self) -> Option<Address> {
        self.math
    }

    pub fn gauge(&self) -> Option<Address> {
        self.gauge
    }

    pub fn views(&self) -> Option<Address> {
        self.views
    }
}

fn set_indexed(slots: &mut BTreeMap<u64, Address>, index: u64, template: Option<Address>) {
    match template {
        Some(template) => {
            slots.insert(index, template);
        }
        None => {
            slots.remove(&index);
        }
    }
}
