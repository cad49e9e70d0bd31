//! Error types for the arbor core library.
//!
//! Defines error enums exposed by the public API and a convenient result alias.

use std::fmt;

use thiserror::Error;

use crate::{id::ClusterId, mst::MstError};

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? $( ( $($tuple:tt)* ) )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? $( ( $($tuple)* ) )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// An error produced while inserting distances into a [`crate::DistanceGraph`].
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum GraphError {
    /// The distance was NaN or infinite.
    #[error("distance between `{left}` and `{right}` is not finite ({distance})")]
    NonFiniteDistance {
        /// First endpoint as written in the input.
        left: ClusterId,
        /// Second endpoint as written in the input.
        right: ClusterId,
        /// Offending value.
        distance: f64,
    },
    /// The distance was below zero.
    #[error("distance between `{left}` and `{right}` is negative ({distance})")]
    NegativeDistance {
        /// First endpoint as written in the input.
        left: ClusterId,
        /// Second endpoint as written in the input.
        right: ClusterId,
        /// Offending value.
        distance: f64,
    },
}

define_error_codes! {
    /// Stable codes describing [`GraphError`] variants.
    enum GraphErrorCode for GraphError {
        /// The distance was NaN or infinite.
        NonFiniteDistance => NonFiniteDistance { .. } => "GRAPH_NON_FINITE_DISTANCE",
        /// The distance was below zero.
        NegativeDistance => NegativeDistance { .. } => "GRAPH_NEGATIVE_DISTANCE",
    }
}

/// Error type produced when configuring or running [`crate::Arbor`].
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ArborError {
    /// The distance table produced no nodes, so no root can be chosen.
    #[error("the distance graph contains no clusters")]
    EmptyInput,
    /// The distance table splits into several connected components.
    #[error(
        "the distance graph has {components} connected components; a spanning tree needs exactly one"
    )]
    DisconnectedGraph {
        /// Number of connected components found by the spanning forest.
        components: usize,
    },
    /// A metadata row referenced a cluster that is not in the graph.
    #[error("metadata line {line} references unknown cluster `{cluster}`")]
    UnknownClusterReference {
        /// Cluster identifier extracted from the row.
        cluster: ClusterId,
        /// 1-based line number of the row in the metadata table.
        line: usize,
    },
    /// A rendering scale parameter was zero, negative or non-finite.
    #[error("{parameter} must be finite and greater than zero (got {value})")]
    InvalidScale {
        /// Name of the rejected parameter.
        parameter: &'static str,
        /// Rejected value.
        value: f64,
    },
    /// Graph construction failed.
    #[error(transparent)]
    Graph(#[from] GraphError),
    /// Spanning forest construction failed.
    #[error(transparent)]
    Mst(#[from] MstError),
}

define_error_codes! {
    /// Stable codes describing [`ArborError`] variants.
    enum ArborErrorCode for ArborError {
        /// The distance table produced no nodes.
        EmptyInput => EmptyInput => "EMPTY_INPUT",
        /// The distance table splits into several connected components.
        DisconnectedGraph => DisconnectedGraph { .. } => "DISCONNECTED_GRAPH",
        /// A metadata row referenced a cluster that is not in the graph.
        UnknownClusterReference => UnknownClusterReference { .. } => "UNKNOWN_CLUSTER_REFERENCE",
        /// A rendering scale parameter was invalid.
        InvalidScale => InvalidScale { .. } => "INVALID_SCALE",
        /// Graph construction failed.
        Graph => Graph(..) => "GRAPH_INVALID",
        /// Spanning forest construction failed.
        Mst => Mst(..) => "MST_FAILED",
    }
}

impl ArborError {
    /// Returns the nested [`GraphErrorCode`] when this error wraps a graph failure.
    ///
    /// # Examples
    /// ```
    /// use arbor_core::{ArborError, GraphError, GraphErrorCode};
    ///
    /// let err = ArborError::from(GraphError::NegativeDistance {
    ///     left: "a".into(),
    ///     right: "b".into(),
    ///     distance: -1.0,
    /// });
    /// assert_eq!(err.graph_code(), Some(GraphErrorCode::NegativeDistance));
    /// assert_eq!(ArborError::EmptyInput.graph_code(), None);
    /// ```
    #[must_use]
    pub const fn graph_code(&self) -> Option<GraphErrorCode> {
        match self {
            Self::Graph(inner) => Some(inner.code()),
            _ => None,
        }
    }
}

/// Convenient result alias for arbor operations.
pub type Result<T, E = ArborError> = core::result::Result<T, E>;
