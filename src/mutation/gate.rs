use std::collections::HashMap;
use std::sync::{Arc, Condvar, Mutex};

use crate::cache::{CacheError, QueryKey};

#[derive(Default)]
struct Gate {
    busy: Mutex<bool>,
    freed: Condvar,
}

impl Gate {
    fn acquire(&self) {
        let mut busy = self.busy.lock().unwrap();
        while *busy {
            busy = self.freed.wait(busy).unwrap();
        }
        *busy = true;
    }

    fn try_acquire(&self) -> bool {
        let mut busy = self.busy.lock().unwrap();
        if *busy {
            false
        } else {
            *busy = true;
            true
        }
    }

    fn release(&self) {
        let mut busy = self.busy.lock().unwrap();
        if *busy {
            *busy = false;
            self.freed.notify_one();
        }
    }

    fn is_held(&self) -> bool {
        *self.busy.lock().unwrap()
    }
}

/// Serializes mutations per query key.
///
/// [`KeyGate::acquire`] blocks until the key is free and returns a
/// [`Permit`]; the permit releases the key when dropped. Mutations on
/// different keys never wait on each other. Waiters on the same key are
/// admitted one at a time; the wake order among several waiters follows the
/// platform condvar and is not specified.
#[derive(Default)]
pub struct KeyGate {
    gates: Mutex<HashMap<QueryKey, Arc<Gate>>>,
}

impl KeyGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Blocks until the key is free, then takes it.
    pub fn acquire(&self, key: &QueryKey) -> Result<Permit, CacheError> {
        let gate = self.ensure_gate(key)?;
        gate.acquire();
        Ok(Permit {
            gate,
            key: key.clone(),
        })
    }

    /// Takes the key only if it is free right now.
    pub fn try_acquire(&self, key: &QueryKey) -> Result<Option<Permit>, CacheError> {
        let gate = self.ensure_gate(key)?;
        if gate.try_acquire() {
            Ok(Some(Permit {
                gate,
                key: key.clone(),
            }))
        } else {
            Ok(None)
        }
    }

    /// Whether some permit currently holds the key.
    pub fn is_held(&self, key: &QueryKey) -> bool {
        let gates = match self.gates.lock() {
            Ok(gates) => gates,
            Err(_) => return false,
        };
        gates.get(key).map(|g| g.is_held()).unwrap_or(false)
    }

    // The map lock is only held long enough to clone the Arc; blocking on
    // the gate itself happens outside it, so contention on one key never
    // stalls acquisition of another.
    fn ensure_gate(&self, key: &QueryKey) -> Result<Arc<Gate>, CacheError> {
        let mut gates = self
            .gates
            .lock()
            .map_err(|_| CacheError::Storage("gate map poisoned".to_string()))?;
        let gate = gates.entry(key.clone()).or_default();
        Ok(Arc::clone(gate))
    }
}

/// Exclusive hold on one query key. Releases on drop.
pub struct Permit {
    gate: Arc<Gate>,
    key: QueryKey,
}

impl Permit {
    pub fn key(&self) -> &QueryKey {
        &self.key
    }
}

impl Drop for Permit {
    fn drop(&mut self) {
        self.gate.release();
    }
}
