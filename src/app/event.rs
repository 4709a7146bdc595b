use crate::store::Mutation;

#[derive(Debug)]
pub enum AppEvent {
    /// A line typed on stdin
    Input(String),

    /// stdin reached end of file
    InputClosed,

    /// A dispatched action's mutation was applied by the store
    Committed(Mutation),
}
