//! Entity registry: the host side of the sensor platform.
//!
//! Owns every registered [`SensorEntity`], drives their refreshes and turns
//! refresh outcomes into availability changes and events.

use std::collections::{BTreeMap, HashSet};
use std::future::Future;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tokio::sync::Mutex;
use tokio::task::JoinSet;

use nilan_domain::error::{NilanError, NotFoundError, ValidationError};
use nilan_domain::event::{Event, EventType};
use nilan_domain::sensor::SensorState;

use crate::ports::{EntityRegistrar, EventPublisher, NilanDevice, Registration};
use crate::sensor_platform::SensorEntity;

/// One registered entity and the last state it published.
///
/// Readers only ever touch `snapshot`, so they never wait on a device read
/// holding `entity`.
struct Slot<D> {
    entity: Mutex<SensorEntity<D>>,
    snapshot: RwLock<SensorState>,
}

impl<D> Slot<D> {
    fn new(entity: SensorEntity<D>) -> Self {
        Self {
            snapshot: RwLock::new(entity.state()),
            entity: Mutex::new(entity),
        }
    }

    fn snapshot(&self) -> SensorState {
        self.snapshot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn store(&self, state: SensorState) {
        *self.snapshot.write().unwrap_or_else(PoisonError::into_inner) = state;
    }
}

struct Entries<D> {
    registered: BTreeMap<&'static str, Arc<Slot<D>>>,
    /// Ids claimed by an `add_entities` call that is still refreshing them.
    reserved: HashSet<&'static str>,
}

/// Ids claimed by one `add_entities` call, released on drop.
struct Reservation<'a, D> {
    entries: &'a RwLock<Entries<D>>,
    ids: Vec<&'static str>,
}

impl<D> Drop for Reservation<'_, D> {
    fn drop(&mut self) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        for id in &self.ids {
            entries.reserved.remove(id);
        }
    }
}

/// Outcome of one [`EntityRegistry::refresh_all`] pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RefreshSummary {
    pub refreshed: usize,
    pub failed: usize,
}

/// In-process host registry for sensor entities.
///
/// Each entity sits behind its own lock, so refreshes of different
/// entities never wait on each other.
pub struct EntityRegistry<D, EP> {
    entries: RwLock<Entries<D>>,
    publisher: EP,
}

impl<D, EP> EntityRegistry<D, EP>
where
    D: NilanDevice + 'static,
    EP: EventPublisher + Send + Sync,
{
    /// Create an empty registry publishing events through `publisher`.
    pub fn new(publisher: EP) -> Self {
        Self {
            entries: RwLock::new(Entries {
                registered: BTreeMap::new(),
                reserved: HashSet::new(),
            }),
            publisher,
        }
    }

    /// Number of registered entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.read_entries().registered.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.read_entries().registered.is_empty()
    }

    /// Snapshots of every registered entity, ordered by unique id.
    ///
    /// Returns the last published state; refreshes in flight are not waited on.
    #[must_use]
    pub fn list(&self) -> Vec<SensorState> {
        self.read_entries()
            .registered
            .values()
            .map(|slot| slot.snapshot())
            .collect()
    }

    /// Snapshot of one entity.
    ///
    /// # Errors
    ///
    /// Returns [`NilanError::NotFound`] when no entity has `unique_id`.
    pub fn get(&self, unique_id: &str) -> Result<SensorState, NilanError> {
        Ok(self.slot(unique_id)?.snapshot())
    }

    /// Refresh one entity now.
    ///
    /// # Errors
    ///
    /// Returns [`NilanError::NotFound`] for an unknown id, or the device
    /// error when the refresh failed (the entity is then unavailable).
    #[tracing::instrument(skip(self))]
    pub async fn refresh(&self, unique_id: &str) -> Result<SensorState, NilanError> {
        let slot = self.slot(unique_id)?;
        let mut entity = slot.entity.lock().await;
        let (event, result) = refresh_entity(&mut entity).await;
        let state = entity.state();
        slot.store(state.clone());
        drop(entity);

        if let Some(event) = event {
            self.emit(event).await;
        }
        result.map(|()| state)
    }

    /// Refresh every enabled entity concurrently.
    ///
    /// Failures are logged and counted, never returned.
    pub async fn refresh_all(&self) -> RefreshSummary {
        let slots: Vec<Arc<Slot<D>>> = self.read_entries().registered.values().cloned().collect();

        let mut tasks = JoinSet::new();
        for slot in slots {
            tasks.spawn(async move {
                let mut entity = slot.entity.lock().await;
                if !entity.descriptor().enabled_by_default {
                    return None;
                }
                let outcome = refresh_entity(&mut entity).await;
                slot.store(entity.state());
                Some(outcome)
            });
        }

        let mut summary = RefreshSummary::default();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(Some((event, result))) => {
                    if result.is_ok() {
                        summary.refreshed += 1;
                    } else {
                        summary.failed += 1;
                    }
                    if let Some(event) = event {
                        self.emit(event).await;
                    }
                }
                Ok(None) => {}
                Err(err) => {
                    tracing::error!(%err, "sensor refresh task panicked");
                    summary.failed += 1;
                }
            }
        }
        summary
    }

    async fn register(
        &self,
        entities: Vec<SensorEntity<D>>,
        update_before_add: bool,
    ) -> Registration {
        let (reservation, accepted, rejected) = self.reserve(entities);

        let ready = if update_before_add {
            refresh_before_add(accepted).await
        } else {
            accepted
        };
        let lost = reservation.ids.len() - ready.len();

        let mut events = Vec::with_capacity(ready.len());
        {
            let mut entries = self.write_entries();
            for entity in ready {
                let state = entity.state();
                events.push(Event::new(
                    EventType::EntityAdded,
                    entity.unique_id(),
                    serde_json::json!({
                        "attribute": state.attribute,
                        "state": state.native_value,
                        "available": state.available,
                    }),
                ));
                entries
                    .registered
                    .insert(entity.unique_id(), Arc::new(Slot::new(entity)));
            }
        }
        drop(reservation);

        if lost > 0 {
            tracing::error!(lost, "sensor entities dropped, initial refresh panicked");
        }
        tracing::info!(
            added = events.len(),
            rejected = rejected.len(),
            "sensor entities registered"
        );
        let added = events.len();
        for event in events {
            self.emit(event).await;
        }
        Registration {
            added,
            rejected,
            lost,
        }
    }

    /// Claim the unique id of every entity not already registered or claimed.
    ///
    /// Claims are taken under the write lock, so two overlapping
    /// registrations can never both accept the same id.
    #[allow(clippy::type_complexity)]
    fn reserve(
        &self,
        entities: Vec<SensorEntity<D>>,
    ) -> (
        Reservation<'_, D>,
        Vec<SensorEntity<D>>,
        Vec<ValidationError>,
    ) {
        let mut entries = self.write_entries();
        let mut ids = Vec::with_capacity(entities.len());
        let mut accepted = Vec::with_capacity(entities.len());
        let mut rejected = Vec::new();
        for entity in entities {
            let unique_id = entity.unique_id();
            if entries.registered.contains_key(unique_id) || !entries.reserved.insert(unique_id) {
                tracing::warn!(
                    unique_id,
                    attribute = entity.attribute(),
                    "unique id already registered, skipping sensor"
                );
                rejected.push(ValidationError::DuplicateUniqueId(unique_id.to_string()));
            } else {
                ids.push(unique_id);
                accepted.push(entity);
            }
        }
        drop(entries);

        let reservation = Reservation {
            entries: &self.entries,
            ids,
        };
        (reservation, accepted, rejected)
    }

    fn slot(&self, unique_id: &str) -> Result<Arc<Slot<D>>, NilanError> {
        self.read_entries()
            .registered
            .get(unique_id)
            .cloned()
            .ok_or_else(|| {
                NotFoundError {
                    entity: "Sensor",
                    id: unique_id.to_string(),
                }
                .into()
            })
    }

    fn read_entries(&self) -> RwLockReadGuard<'_, Entries<D>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_entries(&self) -> RwLockWriteGuard<'_, Entries<D>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }

    async fn emit(&self, event: Event) {
        if let Err(err) = self.publisher.publish(event).await {
            tracing::warn!(error = %err, "failed to publish sensor event");
        }
    }
}

/// Refresh each enabled entity once, concurrently.
///
/// A failed read keeps the entity, marked unavailable. An entity whose task
/// panicked is not returned.
async fn refresh_before_add<D: NilanDevice + 'static>(
    entities: Vec<SensorEntity<D>>,
) -> Vec<SensorEntity<D>> {
    let mut tasks = JoinSet::new();
    for mut entity in entities {
        tasks.spawn(async move {
            if entity.descriptor().enabled_by_default
                && let Err(err) = entity.update().await
            {
                tracing::warn!(
                    unique_id = entity.unique_id(),
                    error = %err,
                    "initial sensor refresh failed, adding as unavailable"
                );
                entity.set_available(false);
            }
            entity
        });
    }

    let mut ready = Vec::with_capacity(tasks.len());
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(entity) => ready.push(entity),
            Err(err) => tracing::error!(%err, "initial sensor refresh task panicked"),
        }
    }
    ready
}

/// Refresh one locked entity and work out which event, if any, it produced.
async fn refresh_entity<D: NilanDevice>(
    entity: &mut SensorEntity<D>,
) -> (Option<Event>, Result<(), NilanError>) {
    let previous = entity.native_value().cloned();
    let was_available = entity.available();

    match entity.update().await {
        Ok(()) => {
            entity.set_available(true);
            let current = entity.native_value().cloned();
            let event = (previous != current || !was_available).then(|| {
                Event::new(
                    EventType::StateChanged,
                    entity.unique_id(),
                    serde_json::json!({ "from": previous, "to": current }),
                )
            });
            (event, Ok(()))
        }
        Err(err) => {
            entity.set_available(false);
            let event = was_available.then(|| {
                tracing::warn!(
                    unique_id = entity.unique_id(),
                    error = %err,
                    "sensor refresh failed, marking unavailable"
                );
                Event::new(
                    EventType::EntityUnavailable,
                    entity.unique_id(),
                    serde_json::json!({ "error": err.to_string() }),
                )
            });
            (event, Err(err))
        }
    }
}

impl<D, EP> EntityRegistrar<D> for EntityRegistry<D, EP>
where
    D: NilanDevice + 'static,
    EP: EventPublisher + Send + Sync,
{
    fn add_entities(
        &self,
        entities: Vec<SensorEntity<D>>,
        update_before_add: bool,
    ) -> impl Future<Output = Result<Registration, NilanError>> + Send {
        async move { Ok(self.register(entities, update_before_add).await) }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex as StdMutex;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Duration;

    use nilan_domain::platform::Platform;
    use nilan_domain::value::SensorValue;

    use super::*;
    use crate::event_bus::InProcessEventBus;
    use crate::sensor_platform::{build_entities, setup_entry};

    #[derive(Default)]
    struct StubDevice {
        assigned: Vec<String>,
        values: StdMutex<HashMap<String, SensorValue>>,
        latency: Duration,
    }

    impl StubDevice {
        fn with(values: &[(&str, SensorValue)]) -> Arc<Self> {
            Self::slow(values, Duration::ZERO)
        }

        fn slow(values: &[(&str, SensorValue)], latency: Duration) -> Arc<Self> {
            Arc::new(Self {
                assigned: values.iter().map(|(k, _)| (*k).to_string()).collect(),
                values: StdMutex::new(
                    values
                        .iter()
                        .map(|(k, v)| ((*k).to_string(), v.clone()))
                        .collect(),
                ),
                latency,
            })
        }

        fn set(&self, attribute: &str, value: SensorValue) {
            self.values
                .lock()
                .unwrap()
                .insert(attribute.to_string(), value);
        }

        fn remove(&self, attribute: &str) {
            self.values.lock().unwrap().remove(attribute);
        }
    }

    impl NilanDevice for StubDevice {
        fn assigned(&self, platform: Platform) -> Vec<String> {
            match platform {
                Platform::Sensor => self.assigned.clone(),
                _ => Vec::new(),
            }
        }

        fn read(
            &self,
            attribute: &str,
        ) -> impl Future<Output = Result<SensorValue, NilanError>> + Send {
            let result = self
                .values
                .lock()
                .unwrap()
                .get(attribute)
                .cloned()
                .ok_or_else(|| NilanError::device(std::io::Error::other("bus timeout")));
            let latency = self.latency;
            async move {
                tokio::time::sleep(latency).await;
                result
            }
        }
    }

    type Registry = EntityRegistry<StubDevice, Arc<InProcessEventBus>>;

    fn registry() -> (Registry, Arc<InProcessEventBus>) {
        let bus = Arc::new(InProcessEventBus::new(64));
        (EntityRegistry::new(Arc::clone(&bus)), bus)
    }

    #[tokio::test]
    async fn should_refresh_before_add_when_requested() {
        let device = StubDevice::with(&[("get_humidity", SensorValue::Int(54))]);
        let (registry, _bus) = registry();

        setup_entry(device, &registry).await.unwrap();

        let state = registry.get("humidity").unwrap();
        assert_eq!(state.native_value, Some(SensorValue::Int(54)));
        assert!(state.available);
        assert!(state.last_updated.is_some());
    }

    #[tokio::test]
    async fn should_skip_refresh_when_not_requested() {
        let device = StubDevice::with(&[("get_humidity", SensorValue::Int(54))]);
        let (registry, _bus) = registry();

        registry
            .add_entities(build_entities(&device), false)
            .await
            .unwrap();

        let state = registry.get("humidity").unwrap();
        assert!(state.native_value.is_none());
    }

    #[tokio::test]
    async fn should_add_entity_as_unavailable_when_initial_refresh_fails() {
        let device = StubDevice::with(&[("get_humidity", SensorValue::Int(54))]);
        device.remove("get_humidity");
        let (registry, _bus) = registry();

        setup_entry(device, &registry).await.unwrap();

        let state = registry.get("humidity").unwrap();
        assert!(!state.available);
        assert!(state.native_value.is_none());
    }

    #[tokio::test]
    async fn should_reject_already_registered_unique_id() {
        let device = StubDevice::with(&[("get_humidity", SensorValue::Int(54))]);
        let (registry, _bus) = registry();
        setup_entry(Arc::clone(&device), &registry).await.unwrap();

        let registration = setup_entry(device, &registry).await.unwrap();

        assert_eq!(registration.added, 0);
        assert_eq!(
            registration.rejected,
            vec![ValidationError::DuplicateUniqueId("humidity".to_string())]
        );
        assert_eq!(registry.len(), 1);
    }

    #[tokio::test]
    async fn should_skip_repeated_attribute_and_register_the_rest() {
        let device = Arc::new(StubDevice {
            assigned: vec![
                "get_humidity".to_string(),
                "get_humidity".to_string(),
                "get_co2_sensor_value".to_string(),
            ],
            values: StdMutex::new(HashMap::from([
                ("get_humidity".to_string(), SensorValue::Int(54)),
                ("get_co2_sensor_value".to_string(), SensorValue::Int(640)),
            ])),
            ..StubDevice::default()
        });
        let (registry, _bus) = registry();

        let registration = setup_entry(device, &registry).await.unwrap();

        assert_eq!(registration.added, 2);
        assert_eq!(
            registration.rejected,
            vec![ValidationError::DuplicateUniqueId("humidity".to_string())]
        );
        assert_eq!(registry.len(), 2);
        assert_eq!(
            registry.get("co2_sensor").unwrap().native_value,
            Some(SensorValue::Int(640))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn should_register_unique_id_once_when_registrations_overlap() {
        let first = StubDevice::slow(
            &[("get_humidity", SensorValue::Int(11))],
            Duration::from_millis(200),
        );
        let second = StubDevice::slow(
            &[("get_humidity", SensorValue::Int(22))],
            Duration::from_millis(200),
        );
        let (registry, bus) = registry();
        let mut rx = bus.subscribe();

        let (a, b) = tokio::join!(
            registry.add_entities(build_entities(&first), true),
            registry.add_entities(build_entities(&second), true),
        );
        let (a, b) = (a.unwrap(), b.unwrap());

        assert_eq!(a.added + b.added, 1);
        assert_eq!(a.rejected.len() + b.rejected.len(), 1);
        assert_eq!(registry.len(), 1);
        let expected = if a.added == 1 { 11 } else { 22 };
        assert_eq!(
            registry.get("humidity").unwrap().native_value,
            Some(SensorValue::Int(expected))
        );
        assert_eq!(rx.recv().await.unwrap().event_type, EventType::EntityAdded);
        assert!(rx.try_recv().is_err());
    }

    /// Panics on the first humidity read only.
    struct FaultyDriver {
        armed: AtomicBool,
    }

    impl NilanDevice for FaultyDriver {
        fn assigned(&self, _platform: Platform) -> Vec<String> {
            vec!["get_humidity".to_string(), "get_time".to_string()]
        }

        fn read(
            &self,
            attribute: &str,
        ) -> impl Future<Output = Result<SensorValue, NilanError>> + Send {
            let explode = attribute == "get_humidity" && self.armed.swap(false, Ordering::SeqCst);
            async move {
                assert!(!explode, "register decoding overflow");
                Ok(SensorValue::from("12:00"))
            }
        }
    }

    #[tokio::test]
    async fn should_report_entity_lost_to_panicking_initial_refresh() {
        let device = Arc::new(FaultyDriver {
            armed: AtomicBool::new(true),
        });
        let registry = EntityRegistry::new(InProcessEventBus::new(16));

        let registration = setup_entry(Arc::clone(&device), &registry).await.unwrap();

        assert_eq!(registration.added, 1);
        assert_eq!(registration.lost, 1);
        assert!(registry.get("humidity").is_err());

        let retry = setup_entry(device, &registry).await.unwrap();
        assert_eq!(retry.added, 1);
        assert!(registry.get("humidity").is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn should_serve_last_state_while_refresh_is_in_flight() {
        let device = StubDevice::slow(
            &[("get_humidity", SensorValue::Int(54))],
            Duration::from_millis(200),
        );
        let (registry, _bus) = registry();
        setup_entry(Arc::clone(&device), &registry).await.unwrap();
        let registry = Arc::new(registry);

        device.set("get_humidity", SensorValue::Int(61));
        let pending = tokio::spawn({
            let registry = Arc::clone(&registry);
            async move { registry.refresh("humidity").await }
        });
        tokio::time::sleep(Duration::from_millis(50)).await;

        assert_eq!(registry.list()[0].native_value, Some(SensorValue::Int(54)));
        assert_eq!(
            registry.get("humidity").unwrap().native_value,
            Some(SensorValue::Int(54))
        );

        pending.await.unwrap().unwrap();
        assert_eq!(
            registry.get("humidity").unwrap().native_value,
            Some(SensorValue::Int(61))
        );
    }

    #[tokio::test]
    async fn should_return_not_found_for_unknown_unique_id() {
        let (registry, _bus) = registry();
        assert!(registry.is_empty());
        let result = registry.get("humidity");
        assert!(matches!(result, Err(NilanError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_list_states_ordered_by_unique_id() {
        let device = StubDevice::with(&[
            ("get_time", SensorValue::from("12:00")),
            ("get_humidity", SensorValue::Int(54)),
        ]);
        let (registry, _bus) = registry();
        setup_entry(device, &registry).await.unwrap();

        let ids: Vec<_> = registry
            .list()
            .into_iter()
            .map(|s| s.unique_id)
            .collect();
        assert_eq!(ids, vec!["humidity", "time"]);
    }

    #[tokio::test]
    async fn should_publish_state_changed_when_value_changes() {
        let device = StubDevice::with(&[("get_humidity", SensorValue::Int(54))]);
        let (registry, bus) = registry();
        setup_entry(Arc::clone(&device), &registry).await.unwrap();
        let mut rx = bus.subscribe();

        device.set("get_humidity", SensorValue::Int(61));
        let state = registry.refresh("humidity").await.unwrap();

        assert_eq!(state.native_value, Some(SensorValue::Int(61)));
        let event = rx.recv().await.unwrap();
        assert_eq!(event.event_type, EventType::StateChanged);
        assert_eq!(event.data, serde_json::json!({"from": 54, "to": 61}));
    }

    #[tokio::test]
    async fn should_not_publish_when_value_is_unchanged() {
        let device = StubDevice::with(&[("get_humidity", SensorValue::Int(54))]);
        let (registry, bus) = registry();
        setup_entry(device, &registry).await.unwrap();
        let mut rx = bus.subscribe();

        registry.refresh("humidity").await.unwrap();

        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn should_mark_unavailable_and_keep_value_when_refresh_fails() {
        let device = StubDevice::with(&[("get_humidity", SensorValue::Int(54))]);
        let (registry, bus) = registry();
        setup_entry(Arc::clone(&device), &registry).await.unwrap();
        let mut rx = bus.subscribe();

        device.remove("get_humidity");
        let result = registry.refresh("humidity").await;

        assert!(matches!(result, Err(NilanError::Device(_))));
        let state = registry.get("humidity").unwrap();
        assert!(!state.available);
        assert_eq!(state.native_value, Some(SensorValue::Int(54)));
        let event = rx.recv().await.unwrap();
        assert_eq!(event.event_type, EventType::EntityUnavailable);
    }

    #[tokio::test]
    async fn should_recover_availability_on_next_successful_refresh() {
        let device = StubDevice::with(&[("get_humidity", SensorValue::Int(54))]);
        let (registry, _bus) = registry();
        setup_entry(Arc::clone(&device), &registry).await.unwrap();

        device.remove("get_humidity");
        let _ = registry.refresh("humidity").await;
        device.set("get_humidity", SensorValue::Int(54));
        let state = registry.refresh("humidity").await.unwrap();

        assert!(state.available);
    }

    #[tokio::test]
    async fn should_count_successes_and_failures_in_refresh_all() {
        let device = StubDevice::with(&[
            ("get_humidity", SensorValue::Int(54)),
            ("get_co2_sensor_value", SensorValue::Int(640)),
            ("get_time", SensorValue::from("12:00")),
        ]);
        let (registry, _bus) = registry();
        setup_entry(Arc::clone(&device), &registry).await.unwrap();

        device.remove("get_time");
        let summary = registry.refresh_all().await;

        assert_eq!(
            summary,
            RefreshSummary {
                refreshed: 2,
                failed: 1
            }
        );
    }

    #[tokio::test]
    async fn should_publish_entity_added_for_each_registration() {
        let device = StubDevice::with(&[("get_humidity", SensorValue::Int(54))]);
        let (registry, bus) = registry();
        let mut rx = bus.subscribe();

        setup_entry(device, &registry).await.unwrap();

        let event = rx.recv().await.unwrap();
        assert_eq!(event.event_type, EventType::EntityAdded);
        assert_eq!(event.unique_id, "humidity");
        assert_eq!(event.data["state"], 54);
    }
}
