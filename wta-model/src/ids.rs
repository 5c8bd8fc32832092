//! Identifier newtypes used as indices into [`crate::Trace`] and
//! [`crate::Environment`] collections.
//!
//! Parent/child relationships in the domain model (workflow/task,
//! cluster/machine) are cyclic in the conceptual sense: a workflow knows its
//! tasks and a task knows its workflow. Rather than modelling that with
//! shared-ownership pointers, every back-reference is one of these ids, and
//! the owning collection resolves it via indexed lookup.

use core::fmt;

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(pub u32);

        impl $name {
            /// Returns the raw index this id wraps.
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl From<u32> for $name {
            fn from(value: u32) -> Self {
                $name(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_type!(
    /// Identifies a [`crate::Task`] uniquely within a [`crate::Trace`].
    TaskId
);
id_type!(
    /// Identifies a [`crate::Workflow`] uniquely within a [`crate::Trace`].
    WorkflowId
);
id_type!(
    /// Identifies a [`crate::Machine`] uniquely within an [`crate::Environment`].
    MachineId
);
id_type!(
    /// Identifies a [`crate::Cluster`] uniquely within an [`crate::Environment`].
    ClusterId
);
