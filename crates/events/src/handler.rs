/// Execute an aggregate command deterministically (no IO, no async).
///
/// Canonical decide-then-evolve lifecycle:
///
/// 1. **Decide**: `aggregate.handle(command)` produces events without mutation.
/// 2. **Evolve**: each event is applied to the aggregate in order.
///
/// If `handle` rejects the command the aggregate is left untouched. The
/// returned events are exactly the ones that were applied.
pub fn execute<A>(
    aggregate: &mut A,
    command: &A::Command,
) -> Result<Vec<A::Event>, A::Error>
where
    A: storefront_core::Aggregate,
{
    let events = A::handle(aggregate, command)?;
    for ev in &events {
        A::apply(aggregate, ev);
    }
    Ok(events)
}
