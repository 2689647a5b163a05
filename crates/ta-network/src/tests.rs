//! Unit tests for ta-network.
//!
//! All tests use hand-crafted networks or in-memory CSV so they run without
//! any data files.

#[cfg(test)]
mod helpers {
    use crate::{LinkSpec, NetworkBuilder, NodeSpec, PhyNetwork};

    /// Two zones joined by two routes.
    ///
    /// ```text
    ///          ┌── 3 ──┐           route via 3: 1 + 1 = 2 min
    ///   A: 1 ──┤       ├── 2 :B
    ///          └── 4 ──┘           route via 4: 2 + 2 = 4 min
    /// ```
    ///
    /// Link ids (insertion order): 0: 1→3, 1: 3→2, 2: 1→4, 3: 4→2.
    pub fn diamond() -> PhyNetwork {
        let mut b = NetworkBuilder::new(1);
        b.add_node(NodeSpec::new("1", "A").at(0.0, 0.0).activity());
        b.add_node(NodeSpec::new("2", "B").at(2.0, 0.0).activity());
        b.add_node(NodeSpec::new("3", "-1").at(1.0, 1.0));
        b.add_node(NodeSpec::new("4", "-1").at(1.0, -1.0));
        b.add_link(LinkSpec::new("13", "1", "3", 1.0));
        b.add_link(LinkSpec::new("32", "3", "2", 1.0));
        b.add_link(LinkSpec::new("14", "1", "4", 2.0));
        b.add_link(LinkSpec::new("42", "4", "2", 2.0));
        b.build()
    }

    /// Current period-0 travel times of every link as a cost view.
    pub fn cost_view(net: &PhyNetwork) -> Vec<f64> {
        net.links.iter().map(|l| l.travel_times[0]).collect()
    }
}

// ── Builder & network structure ───────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use ta_core::{LinkId, NodeId, ZoneId};

    use crate::{LinkSpec, NetworkBuilder, NodeSpec, DEFAULT_ZONE_ID};

    #[test]
    fn empty_build() {
        let net = NetworkBuilder::new(1).build();
        assert_eq!(net.node_count(), 0);
        assert_eq!(net.link_count(), 0);
        assert_eq!(net.zone_count(), 0);
    }

    #[test]
    fn zones_created_in_first_seen_order() {
        let net = super::helpers::diamond();
        assert_eq!(net.zone_count(), 3);
        assert_eq!(net.zone_id("A"), Some(ZoneId(0)));
        assert_eq!(net.zone_id("B"), Some(ZoneId(1)));
        assert_eq!(net.zone_id(DEFAULT_ZONE_ID), Some(ZoneId(2)));
        assert_eq!(net.zone(ZoneId(2)).nodes, vec![NodeId(2), NodeId(3)]);
        assert!(net.zone(ZoneId(2)).activity_nodes.is_empty());
    }

    #[test]
    fn every_node_in_exactly_one_zone() {
        let net = super::helpers::diamond();
        for (i, node) in net.nodes.iter().enumerate() {
            let id = NodeId(i as u32);
            let owners = net.zones.iter().filter(|z| z.nodes.contains(&id)).count();
            assert_eq!(owners, 1, "node {} owned by {owners} zones", node.id);
            assert!(net.zone(node.zone).nodes.contains(&id));
        }
    }

    #[test]
    fn duplicate_node_id_is_ignored() {
        let mut b = NetworkBuilder::new(1);
        assert!(b.add_node(NodeSpec::new("1", "A")).is_some());
        assert!(b.add_node(NodeSpec::new("1", "B")).is_none());
        let net = b.build();
        assert_eq!(net.node_count(), 1);
        assert!(!net.contains_zone("B"));
    }

    #[test]
    fn link_with_unknown_endpoint_is_dropped() {
        let mut b = NetworkBuilder::new(1);
        b.add_node(NodeSpec::new("1", "A"));
        assert!(b.add_link(LinkSpec::new("x", "1", "99", 1.0)).is_none());
        assert_eq!(b.build().link_count(), 0);
    }

    #[test]
    fn csr_out_links_ascending() {
        let net = super::helpers::diamond();
        let n1 = net.node_id("1").unwrap();
        assert_eq!(net.out_links(n1), &[LinkId(0), LinkId(2)]);
        let n2 = net.node_id("2").unwrap();
        assert!(net.out_links(n2).is_empty());
        for (i, l) in net.links.iter().enumerate() {
            assert!(net.out_links(l.from_node).contains(&LinkId(i as u32)));
        }
    }

    #[test]
    fn path_nodes_follow_links() {
        let net = super::helpers::diamond();
        let nodes = net.path_nodes(&[LinkId(0), LinkId(1)]);
        let ids: Vec<&str> = nodes.iter().map(|&n| net.node(n).id.as_str()).collect();
        assert_eq!(ids, ["1", "3", "2"]);
        assert!(net.path_nodes(&[]).is_empty());
    }

    #[test]
    fn allowed_uses_matching() {
        let mut b = NetworkBuilder::new(1);
        b.add_node(NodeSpec::new("1", "A"));
        b.add_node(NodeSpec::new("2", "A"));
        b.add_link(LinkSpec::new("a", "1", "2", 1.0).allowed_uses("auto; hov"));
        b.add_link(LinkSpec::new("b", "1", "2", 1.0).allowed_uses("ALL"));
        b.add_link(LinkSpec::new("c", "1", "2", 1.0).allowed_uses("bike"));
        let net = b.build();
        assert!(net.links[0].allows("hov"));
        assert!(net.links[0].allows("auto"));
        assert!(net.links[1].allows("truck"));
        assert!(!net.links[2].allows("auto"));
    }
}

// ── Connectors ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod connectors {
    use ta_core::ZoneId;

    use crate::{NetworkBuilder, NodeSpec};

    #[test]
    fn centroids_and_connectors_created() {
        let mut net = super::helpers::diamond();
        let physical = net.link_count();
        let created = net.build_connectors();

        // Zones A and B have one activity node each; the sentinel zone is skipped.
        assert_eq!(created, 4);
        assert_eq!(net.link_count(), physical + 4);
        assert!(net.zone(ZoneId(2)).centroid.is_none());

        let a = net.zone(ZoneId(0)).centroid.expect("zone A centroid");
        assert!(net.node(a).is_centroid);
        assert_eq!(net.node(a).zone, ZoneId(0));
        assert_eq!(net.out_links(a).len(), 1);
        let conn = net.link(net.out_links(a)[0]);
        assert!(conn.is_connector);
        assert_eq!(conn.travel_times[0], 0.0);
        assert_eq!(net.physical_links().count(), physical);
    }

    #[test]
    fn idempotent() {
        let mut net = super::helpers::diamond();
        let first = net.build_connectors();
        assert!(net.has_connectors());
        assert_eq!(net.build_connectors(), 0);
        assert_eq!(net.link_count(), 4 + first);
    }

    #[test]
    fn zone_without_activity_nodes_connects_all_members() {
        let mut b = NetworkBuilder::new(1);
        b.add_node(NodeSpec::new("1", "Z").at(0.0, 0.0));
        b.add_node(NodeSpec::new("2", "Z").at(2.0, 4.0));
        let mut net = b.build();
        assert_eq!(net.build_connectors(), 4);
        let c = net.zone(ZoneId(0)).centroid.unwrap();
        assert_eq!((net.node(c).x, net.node(c).y), (1.0, 2.0));
    }
}

// ── Volume-delay model ────────────────────────────────────────────────────────

#[cfg(test)]
mod vdf {
    use ta_core::PeriodId;

    use crate::{LinkSpec, NetworkBuilder, NodeSpec, VdfPeriod, VdfSpec};

    fn bpr(capacity: f64, phf: f64) -> VdfPeriod {
        VdfPeriod { alpha: 0.15, beta: 4.0, mu: 1000.0, capacity, fftt: 10.0, phf }
    }

    #[test]
    fn free_flow_at_zero_volume() {
        assert_eq!(bpr(1000.0, -1.0).travel_time(0.0), 10.0);
    }

    #[test]
    fn at_capacity_adds_alpha() {
        let t = bpr(1000.0, -1.0).travel_time(1000.0);
        assert!((t - 11.5).abs() < 1e-12, "got {t}");
    }

    #[test]
    fn monotone_in_volume() {
        let vdf = bpr(800.0, -1.0);
        let mut prev = vdf.travel_time(0.0);
        for i in 1..200 {
            let t = vdf.travel_time(i as f64 * 25.0);
            assert!(t >= prev, "travel time decreased at step {i}");
            prev = t;
        }
    }

    #[test]
    fn zero_capacity_is_infinite() {
        assert_eq!(bpr(0.0, -1.0).travel_time(0.0), f64::INFINITY);
        assert_eq!(bpr(0.0, -1.0).travel_time(50.0), f64::INFINITY);
    }

    #[test]
    fn peak_hour_factor_scales_capacity() {
        assert_eq!(bpr(1000.0, 0.5).effective_capacity(), 500.0);
        assert_eq!(bpr(1000.0, -1.0).effective_capacity(), 1000.0);
        assert!(bpr(1000.0, 0.5).travel_time(1000.0) > bpr(1000.0, -1.0).travel_time(1000.0));
    }

    #[test]
    fn missing_parameters_take_documented_defaults() {
        let v = VdfSpec::default().resolve(3.0, 1200.0);
        assert_eq!(v, VdfPeriod {
            alpha: 0.15, beta: 4.0, mu: 1000.0, capacity: 1200.0, fftt: 3.0, phf: -1.0,
        });
    }

    #[test]
    fn builder_pads_every_period() {
        let mut b = NetworkBuilder::new(3);
        b.add_node(NodeSpec::new("1", "A"));
        b.add_node(NodeSpec::new("2", "A"));
        let spec = LinkSpec::new("1", "1", "2", 0.5)
            .speed(30.0)
            .lanes(2)
            .vdf(VdfSpec { alpha: Some(1.0), ..VdfSpec::default() });
        b.add_link(spec);
        let net = b.build();
        let link = &net.links[0];
        assert_eq!(link.vdfs.len(), 3);
        assert_eq!(link.vdfs[0].alpha, 1.0);
        assert_eq!(link.vdfs[1].alpha, 0.15);
        assert_eq!(link.vdfs[2].capacity, 120.0);
        assert_eq!(link.fftt(), 1.0);
        assert_eq!(link.travel_times, vec![1.0; 3]);
    }

    #[test]
    fn update_travel_time_reads_volume_only() {
        let mut net = super::helpers::diamond();
        let link = &mut net.links[0];
        link.volumes[0] = 60.0;
        let t = link.update_travel_time(PeriodId(0));
        assert!((t - 1.15).abs() < 1e-12);
        assert_eq!(link.travel_times[0], t);
        assert_eq!(link.volumes[0], 60.0);
    }
}

// ── Shortest-path trees ───────────────────────────────────────────────────────

#[cfg(test)]
mod router {
    use ta_core::{LinkId, ZoneId};

    use crate::{LinkSpec, NetworkBuilder, NodeSpec, ShortestPathTree};

    use super::helpers::{cost_view, diamond};

    #[test]
    fn picks_cheaper_route() {
        let net = diamond();
        let n1 = net.node_id("1").unwrap();
        let n2 = net.node_id("2").unwrap();
        let mut tree = ShortestPathTree::new(net.node_count());
        tree.build(&net, n1, &cost_view(&net));
        assert_eq!(tree.cost_to(n2), Some(2.0));
        assert_eq!(tree.path_to(&net, n2), Some(vec![LinkId(0), LinkId(1)]));
        assert_eq!(tree.path_to(&net, n1), Some(vec![]));
    }

    #[test]
    fn reroutes_when_costs_change() {
        let net = diamond();
        let n1 = net.node_id("1").unwrap();
        let n2 = net.node_id("2").unwrap();
        let mut costs = cost_view(&net);
        costs[1] = 10.0;
        let mut tree = ShortestPathTree::new(net.node_count());
        tree.build(&net, n1, &costs);
        assert_eq!(tree.path_to(&net, n2), Some(vec![LinkId(2), LinkId(3)]));
    }

    #[test]
    fn infinite_cost_links_are_unusable() {
        let net = diamond();
        let n1 = net.node_id("1").unwrap();
        let n2 = net.node_id("2").unwrap();
        let mut costs = cost_view(&net);
        costs[1] = f64::INFINITY;
        costs[3] = f64::INFINITY;
        let mut tree = ShortestPathTree::new(net.node_count());
        tree.build(&net, n1, &costs);
        assert_eq!(tree.cost_to(n2), None);
        assert_eq!(tree.path_to(&net, n2), None);
    }

    #[test]
    fn ties_resolve_to_lowest_link_index() {
        let net = diamond();
        let n1 = net.node_id("1").unwrap();
        let n2 = net.node_id("2").unwrap();
        let costs = vec![1.0; net.link_count()];
        let mut tree = ShortestPathTree::new(net.node_count());
        for _ in 0..5 {
            tree.build(&net, n1, &costs);
            assert_eq!(tree.path_to(&net, n2), Some(vec![LinkId(0), LinkId(1)]));
        }
    }

    #[test]
    fn no_through_routing_via_centroids() {
        // Zone Z holds nodes 1 and 2, which are 50 min apart; zone Y hangs
        // off node 2.  A search from node 1 must not hop 1 → centroid(Z) → 2
        // for free.
        let mut b = NetworkBuilder::new(1);
        b.add_node(NodeSpec::new("1", "Z").activity());
        b.add_node(NodeSpec::new("2", "Z").activity());
        b.add_node(NodeSpec::new("3", "Y").activity());
        b.add_link(LinkSpec::new("12", "1", "2", 50.0));
        b.add_link(LinkSpec::new("23", "2", "3", 1.0));
        let mut net = b.build();
        net.build_connectors();

        let n1 = net.node_id("1").unwrap();
        let y = net.zone(ZoneId(1)).centroid.unwrap();
        let mut tree = ShortestPathTree::new(net.node_count());
        tree.build(&net, n1, &cost_view(&net));
        assert_eq!(tree.cost_to(y), Some(51.0));
    }
}

// ── CSV loader ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod loader {
    use std::io::Cursor;

    use ta_core::ZoneId;

    use crate::{load_links_reader, load_nodes_reader, NetworkBuilder, DEFAULT_ZONE_ID};

    const NODES: &str = "\
node_id,zone_id,x_coord,y_coord,is_boundary,bin_index
1,10,0.5,1.5,1,3
2,,bad,2.0,,
,10,0,0,1,0
3,20,1,1,0,x
";

    #[test]
    fn node_defaults_and_skips() {
        let mut b = NetworkBuilder::new(1);
        let added = load_nodes_reader(Cursor::new(NODES), &mut b).unwrap();
        assert_eq!(added, 3);
        let net = b.build();

        let n1 = net.node(net.node_id("1").unwrap());
        assert_eq!((n1.x, n1.y), (0.5, 1.5));
        assert!(n1.is_activity);
        assert_eq!(net.zone(n1.zone).bin_index, 3);

        let n2 = net.node(net.node_id("2").unwrap());
        assert_eq!((n2.x, n2.y), (91.0, 2.0));
        assert!(!n2.is_activity);
        assert_eq!(net.zone(n2.zone).id, DEFAULT_ZONE_ID);

        let n3 = net.node(net.node_id("3").unwrap());
        assert_eq!(net.zone(n3.zone).bin_index, 0);
        assert_eq!(net.zone_id("20"), Some(ZoneId(2)));
    }

    #[test]
    fn link_defaults_without_vdf_columns() {
        let links = "\
link_id,from_node_id,to_node_id,length
a,1,2,2.0
";
        let mut b = NetworkBuilder::new(2);
        load_nodes_reader(Cursor::new(NODES), &mut b).unwrap();
        assert_eq!(load_links_reader(Cursor::new(links), &mut b).unwrap(), 1);
        let net = b.build();
        let l = &net.links[0];

        assert_eq!(l.lanes, 1);
        assert_eq!(l.link_type, 1);
        assert_eq!(l.free_speed, 60.0);
        assert_eq!(l.capacity, 60.0);
        assert_eq!(l.allowed_uses, "all");
        assert_eq!(l.vdfs.len(), 2);
        for vdf in &l.vdfs {
            assert_eq!(vdf.alpha, 0.15);
            assert_eq!(vdf.beta, 4.0);
            assert_eq!(vdf.mu, 1000.0);
            assert_eq!(vdf.capacity, 60.0);
            assert_eq!(vdf.phf, -1.0);
            assert_eq!(vdf.fftt, 2.0);
        }
        // Finite, equal to free-flow time at zero volume.
        assert_eq!(l.travel_times, vec![2.0, 2.0]);
    }

    #[test]
    fn per_period_vdf_columns() {
        let links = "\
link_id,from_node_id,to_node_id,length,lanes,capacity,VDF_alpha1,VDF_beta1,VDF_cap1,VDF_fftt2,VDF_phf2
a,1,2,1.0,2,900,0.5,2,1500,7.5,0.25
";
        let mut b = NetworkBuilder::new(2);
        load_nodes_reader(Cursor::new(NODES), &mut b).unwrap();
        load_links_reader(Cursor::new(links), &mut b).unwrap();
        let net = b.build();
        let l = &net.links[0];

        assert_eq!((l.vdfs[0].alpha, l.vdfs[0].beta, l.vdfs[0].capacity), (0.5, 2.0, 1500.0));
        assert_eq!(l.vdfs[0].fftt, 1.0);
        assert_eq!((l.vdfs[1].alpha, l.vdfs[1].capacity), (0.15, 1800.0));
        assert_eq!((l.vdfs[1].fftt, l.vdfs[1].phf), (7.5, 0.25));
    }

    #[test]
    fn links_missing_required_fields_are_dropped() {
        let links = "\
link_id,from_node_id,to_node_id,length,free_speed
a,1,2,1.0,fast
b,1,99,1.0,60
c,1,3,,60
,1,3,1.0,60
d,3,1,1.0,30
";
        let mut b = NetworkBuilder::new(1);
        load_nodes_reader(Cursor::new(NODES), &mut b).unwrap();
        assert_eq!(load_links_reader(Cursor::new(links), &mut b).unwrap(), 2);
        let net = b.build();
        assert_eq!(net.links[0].id, "a");
        assert_eq!(net.links[0].free_speed, 60.0);
        assert_eq!(net.links[1].id, "d");
        assert_eq!(net.links[1].fftt(), 2.0);
    }
}
