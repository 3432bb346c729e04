//! The order to cut: piece catalog, demands and stock length
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A piece length together with how many pieces of it are ordered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    /// Length of the piece, in the same unit as the stock length
    pub length: u32,
    /// Number of pieces required
    pub demand: u32,
}

impl Piece {
    pub fn new(length: u32, demand: u32) -> Self {
        Self { length, demand }
    }
}

impl Display for Piece {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.demand, self.length)
    }
}

/// A validated cutting stock instance
///
/// The piece order is significant: it drives pattern enumeration and the order of
/// lengths within every cutting plan line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawInstance")]
pub struct CuttingStockInstance {
    pieces: Vec<Piece>,
    stock_length: u32,
}

impl CuttingStockInstance {
    /// Create a new instance, rejecting input no solve could start from
    ///
    /// # Examples
    /// ```rust
    /// use cutstock_core::instance::{CuttingStockInstance, InstanceError, Piece};
    /// let instance = CuttingStockInstance::new(vec![Piece::new(3, 4), Piece::new(5, 2)], 10).unwrap();
    /// assert_eq!(instance.lengths(), vec![3, 5]);
    ///
    /// let too_long = CuttingStockInstance::new(vec![Piece::new(11, 1)], 10);
    /// assert!(matches!(too_long, Err(InstanceError::PieceLongerThanStock { .. })));
    /// ```
    pub fn new(pieces: Vec<Piece>, stock_length: u32) -> Result<Self, InstanceError> {
        if stock_length == 0 {
            return Err(InstanceError::ZeroStockLength);
        }
        if pieces.is_empty() {
            return Err(InstanceError::NoPieces);
        }
        for (index, piece) in pieces.iter().enumerate() {
            if piece.length == 0 {
                return Err(InstanceError::ZeroPieceLength { index });
            }
            if piece.length > stock_length {
                return Err(InstanceError::PieceLongerThanStock {
                    index,
                    length: piece.length,
                    stock_length,
                });
            }
        }
        Ok(Self {
            pieces,
            stock_length,
        })
    }

    /// Create an instance from parallel slices of lengths and demands
    pub fn from_lengths(
        lengths: &[u32],
        demands: &[u32],
        stock_length: u32,
    ) -> Result<Self, InstanceError> {
        if lengths.len() != demands.len() {
            return Err(InstanceError::MismatchedDemands {
                lengths: lengths.len(),
                demands: demands.len(),
            });
        }
        let pieces = lengths
            .iter()
            .zip(demands)
            .map(|(&length, &demand)| Piece::new(length, demand))
            .collect();
        Self::new(pieces, stock_length)
    }

    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub fn stock_length(&self) -> u32 {
        self.stock_length
    }

    /// Number of distinct piece sizes
    pub fn num_pieces(&self) -> usize {
        self.pieces.len()
    }

    pub fn lengths(&self) -> Vec<u32> {
        self.pieces.iter().map(|p| p.length).collect()
    }

    pub fn demands(&self) -> Vec<u32> {
        self.pieces.iter().map(|p| p.demand).collect()
    }

    /// Total ordered length, a trivial bound on stock consumption
    pub fn total_demanded_length(&self) -> u64 {
        self.pieces
            .iter()
            .map(|p| u64::from(p.length) * u64::from(p.demand))
            .sum()
    }

    /// Demo order: 13 piece sizes cut from stock of length 5600
    pub fn demo() -> Self {
        const ORDERS: [(u32, u32); 13] = [
            (1380, 22),
            (1520, 25),
            (1560, 12),
            (1710, 14),
            (1820, 18),
            (1880, 18),
            (1930, 20),
            (2000, 10),
            (2050, 12),
            (2100, 14),
            (2140, 16),
            (2150, 18),
            (2200, 20),
        ];
        Self {
            pieces: ORDERS.iter().map(|&(l, d)| Piece::new(l, d)).collect(),
            stock_length: 5600,
        }
    }
}

/// Unvalidated instance, the shape of the JSON order table
#[derive(Deserialize)]
struct RawInstance {
    pieces: Vec<Piece>,
    stock_length: u32,
}

impl TryFrom<RawInstance> for CuttingStockInstance {
    type Error = InstanceError;

    fn try_from(raw: RawInstance) -> Result<Self, Self::Error> {
        CuttingStockInstance::new(raw.pieces, raw.stock_length)
    }
}

/// Input rejected before any solve starts
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InstanceError {
    #[error("the order has no pieces")]
    NoPieces,
    #[error("stock length must be positive")]
    ZeroStockLength,
    #[error("piece {index} has zero length")]
    ZeroPieceLength { index: usize },
    #[error("piece {index} of length {length} is longer than the stock length {stock_length}")]
    PieceLongerThanStock {
        index: usize,
        length: u32,
        stock_length: u32,
    },
    #[error("{lengths} piece lengths but {demands} demands")]
    MismatchedDemands { lengths: usize, demands: usize },
}
