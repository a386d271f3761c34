use gatehouse::{
    ControllerRegistry, Dispatcher,
    testing::{CallLog, RecordingHook, ScriptedController, StaticLocator},
};

// ============================================================================
// Test Wiring
// ============================================================================

pub type Registry = ControllerRegistry<StaticLocator, ()>;

/// A dispatcher with one recording hook per lifecycle phase.
pub fn recorded_dispatcher(
    locator: StaticLocator,
    registry: Registry,
    log: &CallLog,
) -> Dispatcher<StaticLocator, ()> {
    let mut dispatcher = Dispatcher::new(locator, (), registry);
    dispatcher
        .register_start(RecordingHook::new("start", log.clone()))
        .register_between(RecordingHook::new("between", log.clone()))
        .register_end(RecordingHook::new("end", log.clone()));
    dispatcher
}

/// Registers an approving controller for every location.
pub fn approving(registry: &mut Registry, log: &CallLog, locations: &[&str]) {
    for location in locations {
        registry
            .register(*location, ScriptedController::approving(*location, log.clone()))
            .unwrap();
    }
}
