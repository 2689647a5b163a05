//! Built-in two-corridor network.
//!
//! Four zones on the corners of a parallel freeway / arterial pair:
//!
//! ```text
//!   "W1" 1 ─┬─ 10 ═══ 11 ═══ 12 ─┬─ 2 "E1"     ═══ freeway   100 km/h, 2 lanes
//!           │                    │
//!   "W2" 3 ─┴─ 20 ─── 21 ─── 22 ─┴─ 4 "E2"     ─── arterial   50 km/h, 1 lane
//! ```
//!
//! Every road is two-way.  Ramps join each zone to both corridors.

use ta_network::{LinkSpec, NetworkBuilder, NodeSpec, PhyNetwork};

/// Embedded AM-peak demand for [`build_network`], in vehicles per hour.
pub const DEMAND_CSV: &str = "\
o_zone_id,d_zone_id,volume
W1,E1,2600
W1,E2,900
W2,E1,1100
W2,E2,1400
E1,W1,700
E2,W2,450
";

fn add_road(b: &mut NetworkBuilder, a: &str, z: &str, km: f64, kmh: f64, lanes: u16, cap: f64) {
    for (from, to) in [(a, z), (z, a)] {
        b.add_link(
            LinkSpec::new(format!("{from}-{to}"), from, to, km)
                .speed(kmh)
                .lanes(lanes)
                .capacity(cap),
        );
    }
}

/// Build the network with one demand period.
pub fn build_network() -> PhyNetwork {
    let mut b = NetworkBuilder::new(1);

    for (id, zone, x, y) in [
        ("1", "W1", 0.0, 1.0),
        ("3", "W2", 0.0, 0.0),
        ("2", "E1", 8.0, 1.0),
        ("4", "E2", 8.0, 0.0),
    ] {
        b.add_node(NodeSpec::new(id, zone).at(x, y).activity());
    }
    for (id, x, y) in [
        ("10", 1.0, 1.0),
        ("11", 4.0, 1.0),
        ("12", 7.0, 1.0),
        ("20", 1.0, 0.0),
        ("21", 4.0, 0.0),
        ("22", 7.0, 0.0),
    ] {
        b.add_node(NodeSpec::new(id, "-1").at(x, y));
    }

    // Freeway.
    add_road(&mut b, "10", "11", 3.0, 100.0, 2, 1_800.0);
    add_road(&mut b, "11", "12", 3.0, 100.0, 2, 1_800.0);
    // Arterial.
    add_road(&mut b, "20", "21", 3.0, 50.0, 1, 900.0);
    add_road(&mut b, "21", "22", 3.0, 50.0, 1, 900.0);
    // Ramps and local streets.
    for (zone_node, fwy, art) in [("1", "10", "20"), ("3", "20", "10"), ("2", "12", "22"), ("4", "22", "12")] {
        add_road(&mut b, zone_node, fwy, 1.0, 60.0, 1, 1_200.0);
        add_road(&mut b, zone_node, art, 1.5, 40.0, 1, 700.0);
    }

    b.build()
}
