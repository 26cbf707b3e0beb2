//! NRF Registry Context
//!
//! Thread-safe in-memory index of registered NF instances and shared-data
//! records. One `Registry` value is constructed at startup and handed to
//! every handler binding.

use std::collections::HashMap;
use std::sync::RwLock;

use thiserror::Error;

use nrf_sbi::model::{NfProfile, SharedData};

/// Outcome of a register-or-replace upsert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    Created,
    Replaced,
}

/// Pagination failure for the list query.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum PageError {
    #[error("start index out of bounds")]
    StartOutOfBounds,
}

/// The registry: NF instances bucketed by type (insertion order preserved
/// within a bucket) plus the shared-data index.
///
/// Readers run concurrently; writers and the presence check of an upsert
/// hold the exclusive lock so two racing PUTs to the same absent id cannot
/// both insert.
pub struct Registry {
    instances: RwLock<HashMap<String, Vec<NfProfile>>>,
    shared: RwLock<HashMap<String, SharedData>>,
}

impl Registry {
    pub fn new() -> Self {
        Self {
            instances: RwLock::new(HashMap::new()),
            shared: RwLock::new(HashMap::new()),
        }
    }

    /// Look up an instance by id across all type buckets.
    pub fn find(&self, nf_instance_id: &str) -> Option<NfProfile> {
        let instances = self.instances.read().unwrap_or_else(|e| e.into_inner());
        for bucket in instances.values() {
            if let Some(instance) = bucket.iter().find(|v| v.nf_instance_id == nf_instance_id) {
                return Some(instance.clone());
            }
        }
        None
    }

    /// Insert or replace the instance with the profile's id, in one
    /// exclusive section. A replacement overwrites the record in the bucket
    /// it already occupies; it does not move between buckets when the
    /// profile's type changed.
    pub fn upsert(&self, profile: NfProfile) -> Upsert {
        let mut instances = self.instances.write().unwrap_or_else(|e| e.into_inner());
        for bucket in instances.values_mut() {
            if let Some(existing) = bucket
                .iter_mut()
                .find(|v| v.nf_instance_id == profile.nf_instance_id)
            {
                *existing = profile;
                return Upsert::Replaced;
            }
        }
        instances
            .entry(profile.nf_type.clone())
            .or_default()
            .push(profile);
        Upsert::Created
    }

    /// Remove the instance with the given id; the bucket is dropped when its
    /// last instance goes. Returns whether anything was deleted.
    pub fn remove(&self, nf_instance_id: &str) -> bool {
        let mut instances = self.instances.write().unwrap_or_else(|e| e.into_inner());
        let mut emptied: Option<String> = None;
        let mut removed = false;
        for (nf_type, bucket) in instances.iter_mut() {
            if let Some(index) = bucket.iter().position(|v| v.nf_instance_id == nf_instance_id) {
                bucket.remove(index);
                if bucket.is_empty() {
                    emptied = Some(nf_type.clone());
                }
                removed = true;
                break;
            }
        }
        if let Some(nf_type) = emptied {
            instances.remove(&nf_type);
        }
        removed
    }

    /// Page through the bucket of a type. An absent bucket yields an empty
    /// page.
    ///
    /// `start = (page_number - 1) * page_size`,
    /// `end = min(page_number + page_size, len, start + limit)`;
    /// a start beyond the bucket is an error.
    pub fn list_page(
        &self,
        nf_type: &str,
        page_number: i32,
        page_size: i32,
        limit: i32,
    ) -> Result<Vec<NfProfile>, PageError> {
        let instances = self.instances.read().unwrap_or_else(|e| e.into_inner());
        let Some(bucket) = instances.get(nf_type) else {
            return Ok(Vec::new());
        };

        let len = bucket.len() as i32;
        let start = (page_number - 1) * page_size;
        let mut end = page_number + page_size;
        if start >= len {
            return Err(PageError::StartOutOfBounds);
        }
        if end > len {
            end = len;
        }
        if end - start > limit {
            end = start + limit;
        }
        Ok(bucket[start as usize..end as usize].to_vec())
    }

    /// Whether any instance of the type is registered.
    pub fn has_type(&self, nf_type: &str) -> bool {
        let instances = self.instances.read().unwrap_or_else(|e| e.into_inner());
        instances.contains_key(nf_type)
    }

    pub fn instance_count(&self) -> usize {
        let instances = self.instances.read().unwrap_or_else(|e| e.into_inner());
        instances.values().map(Vec::len).sum()
    }

    /// Look up a shared-data record by id.
    pub fn shared_find(&self, shared_data_id: &str) -> Option<SharedData> {
        let shared = self.shared.read().unwrap_or_else(|e| e.into_inner());
        shared.get(shared_data_id).cloned()
    }

    /// Insert or replace a shared-data record in one exclusive section.
    pub fn shared_upsert(&self, data: SharedData) -> Upsert {
        let mut shared = self.shared.write().unwrap_or_else(|e| e.into_inner());
        match shared.insert(data.shared_data_id.clone(), data) {
            Some(_) => Upsert::Replaced,
            None => Upsert::Created,
        }
    }

    /// Remove a shared-data record. Returns whether anything was deleted.
    pub fn shared_remove(&self, shared_data_id: &str) -> bool {
        let mut shared = self.shared.write().unwrap_or_else(|e| e.into_inner());
        shared.remove(shared_data_id).is_some()
    }

    pub fn shared_count(&self) -> usize {
        let shared = self.shared.read().unwrap_or_else(|e| e.into_inner());
        shared.len()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(id: &str, nf_type: &str) -> NfProfile {
        NfProfile {
            nf_instance_id: id.to_string(),
            nf_type: nf_type.to_string(),
            nf_status: "REGISTERED".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_upsert_create_then_replace() {
        let registry = Registry::new();
        assert_eq!(registry.upsert(profile("nf-1", "AMF")), Upsert::Created);
        assert_eq!(registry.instance_count(), 1);

        let mut replacement = profile("nf-1", "AMF");
        replacement.nf_status = "SUSPENDED".to_string();
        assert_eq!(registry.upsert(replacement), Upsert::Replaced);
        assert_eq!(registry.instance_count(), 1);

        let stored = registry.find("nf-1").unwrap();
        assert_eq!(stored.nf_status, "SUSPENDED");
    }

    #[test]
    fn test_find_reflects_last_write() {
        let registry = Registry::new();
        registry.upsert(profile("nf-a", "AMF"));
        registry.upsert(profile("nf-b", "SMF"));

        assert_eq!(registry.find("nf-a").unwrap().nf_type, "AMF");
        assert_eq!(registry.find("nf-b").unwrap().nf_type, "SMF");
        assert!(registry.find("nf-c").is_none());

        registry.remove("nf-a");
        assert!(registry.find("nf-a").is_none());
        assert!(registry.find("nf-b").is_some());
    }

    #[test]
    fn test_remove_drops_empty_bucket() {
        let registry = Registry::new();
        registry.upsert(profile("nf-1", "UPF"));
        registry.upsert(profile("nf-2", "UPF"));
        assert!(registry.has_type("UPF"));

        assert!(registry.remove("nf-1"));
        assert!(registry.has_type("UPF"));

        assert!(registry.remove("nf-2"));
        assert!(!registry.has_type("UPF"));
        assert!(!registry.remove("nf-2"));
    }

    #[test]
    fn test_list_page_window() {
        let registry = Registry::new();
        for id in ["a", "b", "c"] {
            registry.upsert(profile(id, "SMF"));
        }

        // page 1, size 2, limit 2 -> first two in insertion order
        let page = registry.list_page("SMF", 1, 2, 2).unwrap();
        let ids: Vec<_> = page.iter().map(|p| p.nf_instance_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);

        // page 2, size 2 -> the remainder
        let page = registry.list_page("SMF", 2, 2, 2).unwrap();
        let ids: Vec<_> = page.iter().map(|p| p.nf_instance_id.as_str()).collect();
        assert_eq!(ids, vec!["c"]);

        // limit clamps the window
        let page = registry.list_page("SMF", 1, 3, 1).unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].nf_instance_id, "a");
    }

    #[test]
    fn test_list_page_out_of_bounds() {
        let registry = Registry::new();
        registry.upsert(profile("a", "SMF"));
        assert_eq!(
            registry.list_page("SMF", 5, 2, 1),
            Err(PageError::StartOutOfBounds)
        );
        assert_eq!(
            PageError::StartOutOfBounds.to_string(),
            "start index out of bounds"
        );

        // an absent bucket is an empty page, not an error
        assert_eq!(registry.list_page("AMF", 1, 1, 1), Ok(Vec::new()));

        registry.remove("a");
        assert_eq!(registry.list_page("SMF", 1, 1, 1), Ok(Vec::new()));
    }

    #[test]
    fn test_replace_keeps_bucket_on_type_change() {
        let registry = Registry::new();
        registry.upsert(profile("nf-1", "AMF"));

        let mut replacement = profile("nf-1", "SMF");
        replacement.nf_status = "SUSPENDED".to_string();
        assert_eq!(registry.upsert(replacement), Upsert::Replaced);

        // the record stays in its original bucket
        assert!(registry.has_type("AMF"));
        assert!(!registry.has_type("SMF"));
        assert_eq!(registry.find("nf-1").unwrap().nf_type, "SMF");
    }

    #[test]
    fn test_shared_index() {
        let registry = Registry::new();
        let data = SharedData {
            shared_data_id: "shared-udm-01".to_string(),
            ..Default::default()
        };
        assert_eq!(registry.shared_upsert(data.clone()), Upsert::Created);
        assert_eq!(registry.shared_upsert(data), Upsert::Replaced);
        assert_eq!(registry.shared_count(), 1);

        assert!(registry.shared_find("shared-udm-01").is_some());
        assert!(registry.shared_remove("shared-udm-01"));
        assert!(!registry.shared_remove("shared-udm-01"));
        assert_eq!(registry.shared_count(), 0);
    }

    #[test]
    fn test_concurrent_upserts_single_winner() {
        use std::sync::Arc;

        let registry = Arc::new(Registry::new());
        let id = "331a1fb2-3ac1-43df-a7d0-882d0ee44b7d";
        let mut handles = Vec::new();
        for _ in 0..8 {
            let registry = registry.clone();
            handles.push(std::thread::spawn(move || registry.upsert(profile(id, "AMF"))));
        }
        let outcomes: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        // exactly one PUT observes "absent"
        let created = outcomes.iter().filter(|o| **o == Upsert::Created).count();
        assert_eq!(created, 1);
        assert_eq!(registry.instance_count(), 1);
    }
}
