//! Edge sockets and the symmetric pairings table
//!
//! A socket is a symbolic marker on one of a tile's four edges. Two tiles may
//! sit next to each other exactly when their facing sockets appear together
//! in the pairings table. The table is data, not behaviour; symmetry is
//! enforced by construction and pinned by the test suite.

/// Compatibility marker on a tile edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Socket {
    /// Grass-like edge; also matches the map boundary and uninitialised cells
    Default,
    /// Road surface continuing across the edge
    Road,
    /// Driveway docking between a lot anchor and a road variant
    LotEntry,
    /// Internal seam between subcells of one multi-cell lot
    LotEdge,
    /// Decorative greenery
    Green,
    /// Hedge line
    Hedge,
    /// Footpath
    Path,
    /// Water body
    Water,
    /// Paved plaza
    Pavement,
}

impl Socket {
    /// Every socket value
    pub const ALL: [Self; 9] = [
        Self::Default,
        Self::Road,
        Self::LotEntry,
        Self::LotEdge,
        Self::Green,
        Self::Hedge,
        Self::Path,
        Self::Water,
        Self::Pavement,
    ];
}

// One row per unordered pair; `sockets_dock` checks both orientations.
const PAIRINGS: [(Socket, Socket); 13] = [
    (Socket::Default, Socket::Default),
    (Socket::Road, Socket::Road),
    (Socket::LotEntry, Socket::LotEntry),
    (Socket::LotEdge, Socket::LotEdge),
    (Socket::Green, Socket::Green),
    (Socket::Green, Socket::Default),
    (Socket::Hedge, Socket::Hedge),
    (Socket::Hedge, Socket::Default),
    (Socket::Path, Socket::Path),
    (Socket::Path, Socket::Default),
    (Socket::Water, Socket::Water),
    (Socket::Pavement, Socket::Pavement),
    (Socket::Pavement, Socket::Default),
];

/// Whether two facing sockets may dock against each other
pub fn sockets_dock(a: Socket, b: Socket) -> bool {
    PAIRINGS
        .iter()
        .any(|&(left, right)| (left == a && right == b) || (left == b && right == a))
}

/// Every socket that may dock against the given one
pub fn pairings_for_socket(socket: Socket) -> Vec<Socket> {
    Socket::ALL
        .into_iter()
        .filter(|&other| sockets_dock(socket, other))
        .collect()
}
