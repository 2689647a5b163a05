//! Physical network representation and builder.
//!
//! # Storage
//!
//! `PhyNetwork` is a single owning aggregate: nodes, links, and zones live in
//! contiguous `Vec`s addressed by `NodeId`, `LinkId`, and `ZoneId`.  All
//! cross-references (link endpoints, zone membership, centroids) are indices,
//! so a `&PhyNetwork` can be shared freely across worker threads.
//!
//! # Adjacency
//!
//! Outgoing links use **Compressed Sparse Row (CSR)** layout.  The outgoing
//! links of node `n` are
//!
//! ```text
//! out_links[ out_start[n] .. out_start[n+1] ]
//! ```
//!
//! in ascending `LinkId` order, which is what makes shortest-path tie-breaking
//! deterministic.
//!
//! # Mutable state
//!
//! Each link carries per-period `volumes` and `travel_times`.  They are
//! written only by the assignment's aggregation step, never while
//! shortest-path trees are being built.

use rustc_hash::FxHashMap;

use ta_core::{LinkId, NodeId, PeriodId, ZoneId};

use crate::vdf::{VdfPeriod, VdfSpec};

/// External id of the sentinel zone that collects nodes without a zone.
pub const DEFAULT_ZONE_ID: &str = "-1";

const DEFAULT_X: f64 = 91.0;
const DEFAULT_Y: f64 = 181.0;

// ── Entities ──────────────────────────────────────────────────────────────────

/// A network node.  Immutable after load.
#[derive(Clone, Debug)]
pub struct Node {
    pub id:          String,
    pub x:           f64,
    pub y:           f64,
    pub zone:        ZoneId,
    /// Trip-generating node (connectors attach here).
    pub is_activity: bool,
    /// Synthetic zone centroid created by [`PhyNetwork::build_connectors`].
    pub is_centroid: bool,
}

/// A directed link.
#[derive(Clone, Debug)]
pub struct Link {
    pub id:           String,
    pub from_node:    NodeId,
    pub to_node:      NodeId,
    pub lanes:        u16,
    pub link_type:    u16,
    /// Free-flow speed (length units per hour).
    pub free_speed:   f64,
    /// Capacity per lane per hour.
    pub capacity:     f64,
    pub length:       f64,
    /// `"all"` or a `;`/`,`-separated list of agent type names.
    pub allowed_uses: String,
    pub geometry:     String,
    pub is_connector: bool,
    /// Volume-delay parameters, one per demand period.
    pub vdfs:         Vec<VdfPeriod>,
    /// Aggregated volume per demand period.
    pub volumes:      Vec<f64>,
    /// Current travel time (minutes) per demand period.
    pub travel_times: Vec<f64>,
}

impl Link {
    /// Free-flow travel time in minutes: `length / free_speed * 60`.
    pub fn fftt(&self) -> f64 {
        if self.is_connector {
            return 0.0;
        }
        if self.free_speed > 0.0 {
            self.length / self.free_speed * 60.0
        } else {
            f64::INFINITY
        }
    }

    /// Capacity across all lanes.
    #[inline]
    pub fn total_capacity(&self) -> f64 {
        self.capacity * self.lanes as f64
    }

    /// `true` if agents of type `mode` may use this link.
    pub fn allows(&self, mode: &str) -> bool {
        if self.is_connector {
            return true;
        }
        let uses = self.allowed_uses.trim();
        uses.is_empty()
            || uses.eq_ignore_ascii_case("all")
            || uses.split([';', ',']).any(|m| m.trim() == mode)
    }

    /// VDF record for `period` (the first period's if the link has fewer).
    pub fn vdf(&self, period: PeriodId) -> Option<&VdfPeriod> {
        self.vdfs.get(period.index()).or_else(|| self.vdfs.first())
    }

    /// Recompute the stored travel time for `period` from its volume.
    ///
    /// Returns the new travel time.  Volume is left untouched.
    pub fn update_travel_time(&mut self, period: PeriodId) -> f64 {
        let p = period.index();
        let volume = self.volumes.get(p).copied().unwrap_or(0.0);
        let tt = match self.vdf(period) {
            Some(vdf) => vdf.travel_time(volume),
            None => self.fftt(),
        };
        if let Some(slot) = self.travel_times.get_mut(p) {
            *slot = tt;
        }
        tt
    }

    #[inline]
    pub fn travel_time(&self, period: PeriodId) -> f64 {
        self.travel_times.get(period.index()).copied().unwrap_or(f64::INFINITY)
    }

    #[inline]
    pub fn volume(&self, period: PeriodId) -> f64 {
        self.volumes.get(period.index()).copied().unwrap_or(0.0)
    }
}

/// A traffic analysis zone.
#[derive(Clone, Debug)]
pub struct Zone {
    pub id:             String,
    pub bin_index:      u16,
    pub nodes:          Vec<NodeId>,
    pub activity_nodes: Vec<NodeId>,
    /// Set by [`PhyNetwork::build_connectors`].
    pub centroid:       Option<NodeId>,
}

impl Zone {
    fn new(id: String, bin_index: u16) -> Self {
        Self {
            id,
            bin_index,
            nodes:          Vec::new(),
            activity_nodes: Vec::new(),
            centroid:       None,
        }
    }

    #[inline]
    pub fn is_sentinel(&self) -> bool {
        self.id == DEFAULT_ZONE_ID
    }
}

// ── PhyNetwork ────────────────────────────────────────────────────────────────

/// Directed road network with zones, in arena + CSR form.
///
/// Construct with [`NetworkBuilder`] (or [`crate::load_network_dir`]).
pub struct PhyNetwork {
    pub nodes: Vec<Node>,
    pub links: Vec<Link>,
    pub zones: Vec<Zone>,

    node_index: FxHashMap<String, NodeId>,
    zone_index: FxHashMap<String, ZoneId>,

    out_start: Vec<u32>,
    out_links: Vec<LinkId>,

    period_count:     usize,
    connectors_built: bool,
}

impl PhyNetwork {
    // ── Dimensions ────────────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    pub fn zone_count(&self) -> usize {
        self.zones.len()
    }

    /// Number of demand periods each link carries VDF/volume slots for.
    pub fn period_count(&self) -> usize {
        self.period_count
    }

    // ── Lookups ───────────────────────────────────────────────────────────

    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    #[inline]
    pub fn link(&self, id: LinkId) -> &Link {
        &self.links[id.index()]
    }

    #[inline]
    pub fn zone(&self, id: ZoneId) -> &Zone {
        &self.zones[id.index()]
    }

    /// Translate an external node id.
    pub fn node_id(&self, id: &str) -> Option<NodeId> {
        self.node_index.get(id).copied()
    }

    /// Translate an external zone id.
    pub fn zone_id(&self, id: &str) -> Option<ZoneId> {
        self.zone_index.get(id).copied()
    }

    pub fn contains_zone(&self, id: &str) -> bool {
        self.zone_index.contains_key(id)
    }

    /// Outgoing links of `node`, ascending by `LinkId`.
    #[inline]
    pub fn out_links(&self, node: NodeId) -> &[LinkId] {
        let start = self.out_start[node.index()] as usize;
        let end   = self.out_start[node.index() + 1] as usize;
        &self.out_links[start..end]
    }

    /// Iterator over the ids of all non-connector links.
    pub fn physical_links(&self) -> impl Iterator<Item = LinkId> + '_ {
        self.links
            .iter()
            .enumerate()
            .filter(|(_, l)| !l.is_connector)
            .map(|(i, _)| LinkId(i as u32))
    }

    /// Node sequence traversed by a link path (first link's origin, then
    /// every link's end node).
    pub fn path_nodes(&self, links: &[LinkId]) -> Vec<NodeId> {
        let mut nodes = Vec::with_capacity(links.len() + 1);
        if let Some(first) = links.first() {
            nodes.push(self.link(*first).from_node);
        }
        nodes.extend(links.iter().map(|&l| self.link(l).to_node));
        nodes
    }

    // ── Connectors ────────────────────────────────────────────────────────

    pub fn has_connectors(&self) -> bool {
        self.connectors_built
    }

    /// Create one centroid node per zone and zero-cost connector links
    /// between it and the zone's activity nodes (every member node if the
    /// zone has none).  The `"-1"` sentinel zone gets no connectors.
    ///
    /// Idempotent.  Returns the number of connector links created.
    pub fn build_connectors(&mut self) -> usize {
        if self.connectors_built {
            return 0;
        }
        self.connectors_built = true;

        let mut created = 0;
        for z in 0..self.zones.len() {
            let zone = &self.zones[z];
            if zone.is_sentinel() {
                continue;
            }
            let targets = if zone.activity_nodes.is_empty() {
                zone.nodes.clone()
            } else {
                zone.activity_nodes.clone()
            };
            if targets.is_empty() {
                continue;
            }

            let n = targets.len() as f64;
            let x = targets.iter().map(|&t| self.nodes[t.index()].x).sum::<f64>() / n;
            let y = targets.iter().map(|&t| self.nodes[t.index()].y).sum::<f64>() / n;

            let centroid = NodeId(self.nodes.len() as u32);
            let zone_ext = zone.id.clone();
            self.nodes.push(Node {
                id:          format!("centroid:{zone_ext}"),
                x,
                y,
                zone:        ZoneId(z as u32),
                is_activity: false,
                is_centroid: true,
            });
            self.zones[z].centroid = Some(centroid);

            for target in targets {
                let target_ext = self.nodes[target.index()].id.clone();
                self.push_connector(format!("conn:{zone_ext}:{target_ext}"), centroid, target);
                self.push_connector(format!("conn:{target_ext}:{zone_ext}"), target, centroid);
                created += 2;
            }
        }

        let (out_start, out_links) = build_adjacency(self.nodes.len(), &self.links);
        self.out_start = out_start;
        self.out_links = out_links;
        created
    }

    fn push_connector(&mut self, id: String, from: NodeId, to: NodeId) {
        let periods = self.period_count;
        self.links.push(Link {
            id,
            from_node:    from,
            to_node:      to,
            lanes:        1,
            link_type:    0,
            free_speed:   0.0,
            capacity:     f64::INFINITY,
            length:       0.0,
            allowed_uses: String::from("all"),
            geometry:     String::new(),
            is_connector: true,
            vdfs:         vec![VdfPeriod::connector(); periods],
            volumes:      vec![0.0; periods],
            travel_times: vec![0.0; periods],
        });
    }
}

// ── NetworkBuilder ────────────────────────────────────────────────────────────

/// Node attributes accepted by [`NetworkBuilder::add_node`].
#[derive(Clone, Debug)]
pub struct NodeSpec {
    pub id:          String,
    pub x:           f64,
    pub y:           f64,
    pub zone_id:     String,
    pub is_activity: bool,
    pub bin_index:   u16,
}

impl NodeSpec {
    /// A node in `zone_id` with all optional attributes at their defaults.
    pub fn new(id: impl Into<String>, zone_id: impl Into<String>) -> Self {
        Self {
            id:          id.into(),
            x:           DEFAULT_X,
            y:           DEFAULT_Y,
            zone_id:     zone_id.into(),
            is_activity: false,
            bin_index:   0,
        }
    }

    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    pub fn activity(mut self) -> Self {
        self.is_activity = true;
        self
    }
}

/// Link attributes accepted by [`NetworkBuilder::add_link`].
#[derive(Clone, Debug)]
pub struct LinkSpec {
    pub id:           String,
    pub from_node_id: String,
    pub to_node_id:   String,
    pub length:       f64,
    pub lanes:        u16,
    pub link_type:    u16,
    pub free_speed:   f64,
    pub capacity:     f64,
    pub allowed_uses: String,
    pub geometry:     String,
    /// Per-period VDF parameters; missing periods use defaults entirely.
    pub vdfs:         Vec<VdfSpec>,
}

impl LinkSpec {
    /// A link with all optional attributes at their defaults.
    pub fn new(
        id:   impl Into<String>,
        from: impl Into<String>,
        to:   impl Into<String>,
        length: f64,
    ) -> Self {
        Self {
            id:           id.into(),
            from_node_id: from.into(),
            to_node_id:   to.into(),
            length,
            lanes:        1,
            link_type:    1,
            free_speed:   60.0,
            capacity:     60.0,
            allowed_uses: String::from("all"),
            geometry:     String::new(),
            vdfs:         Vec::new(),
        }
    }

    pub fn speed(mut self, free_speed: f64) -> Self {
        self.free_speed = free_speed;
        self
    }

    pub fn capacity(mut self, capacity: f64) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn lanes(mut self, lanes: u16) -> Self {
        self.lanes = lanes;
        self
    }

    pub fn allowed_uses(mut self, uses: impl Into<String>) -> Self {
        self.allowed_uses = uses.into();
        self
    }

    pub fn vdf(mut self, vdf: VdfSpec) -> Self {
        self.vdfs.push(vdf);
        self
    }
}

/// Construct a [`PhyNetwork`] incrementally, then call [`build`](Self::build).
///
/// Zones are created implicitly from node zone ids in first-seen order.
///
/// # Example
///
/// ```
/// use ta_network::{LinkSpec, NetworkBuilder, NodeSpec};
///
/// let mut b = NetworkBuilder::new(1);
/// b.add_node(NodeSpec::new("1", "A").activity());
/// b.add_node(NodeSpec::new("2", "B").activity());
/// b.add_link(LinkSpec::new("1-2", "1", "2", 1.0)).unwrap();
/// let net = b.build();
/// assert_eq!(net.zone_count(), 2);
/// assert_eq!(net.link_count(), 1);
/// ```
pub struct NetworkBuilder {
    nodes:        Vec<Node>,
    links:        Vec<Link>,
    zones:        Vec<Zone>,
    node_index:   FxHashMap<String, NodeId>,
    zone_index:   FxHashMap<String, ZoneId>,
    period_count: usize,
}

impl NetworkBuilder {
    /// `period_count` is the number of demand periods; every link gets that
    /// many VDF/volume/travel-time slots (at least one).
    pub fn new(period_count: usize) -> Self {
        Self {
            nodes:        Vec::new(),
            links:        Vec::new(),
            zones:        Vec::new(),
            node_index:   FxHashMap::default(),
            zone_index:   FxHashMap::default(),
            period_count: period_count.max(1),
        }
    }

    pub fn period_count(&self) -> usize {
        self.period_count
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    /// Resolve an external node id added earlier.
    pub fn node_id(&self, id: &str) -> Option<NodeId> {
        self.node_index.get(id).copied()
    }

    /// Add a node, creating its zone on first sight.
    ///
    /// Returns `None` (and ignores the node) if the id is already taken.
    pub fn add_node(&mut self, spec: NodeSpec) -> Option<NodeId> {
        if self.node_index.contains_key(&spec.id) {
            return None;
        }
        let node_id = NodeId(self.nodes.len() as u32);

        let zone_id = match self.zone_index.get(&spec.zone_id) {
            Some(&z) => z,
            None => {
                let z = ZoneId(self.zones.len() as u32);
                self.zones.push(Zone::new(spec.zone_id.clone(), spec.bin_index));
                self.zone_index.insert(spec.zone_id.clone(), z);
                z
            }
        };
        let zone = &mut self.zones[zone_id.index()];
        zone.nodes.push(node_id);
        if spec.is_activity {
            zone.activity_nodes.push(node_id);
        }

        self.node_index.insert(spec.id.clone(), node_id);
        self.nodes.push(Node {
            id:          spec.id,
            x:           spec.x,
            y:           spec.y,
            zone:        zone_id,
            is_activity: spec.is_activity,
            is_centroid: false,
        });
        Some(node_id)
    }

    /// Add a directed link between two previously added nodes.
    ///
    /// Returns `None` (and drops the link) if either endpoint is unknown.
    pub fn add_link(&mut self, spec: LinkSpec) -> Option<LinkId> {
        let from_node = self.node_id(&spec.from_node_id)?;
        let to_node   = self.node_id(&spec.to_node_id)?;
        let link_id   = LinkId(self.links.len() as u32);

        let mut link = Link {
            id:           spec.id,
            from_node,
            to_node,
            lanes:        spec.lanes,
            link_type:    spec.link_type,
            free_speed:   spec.free_speed,
            capacity:     spec.capacity,
            length:       spec.length,
            allowed_uses: spec.allowed_uses,
            geometry:     spec.geometry,
            is_connector: false,
            vdfs:         Vec::with_capacity(self.period_count),
            volumes:      vec![0.0; self.period_count],
            travel_times: Vec::with_capacity(self.period_count),
        };

        let fftt = link.fftt();
        let cap  = link.total_capacity();
        for p in 0..self.period_count {
            let vdf = match spec.vdfs.get(p) {
                Some(raw) => raw.resolve(fftt, cap),
                None => VdfSpec::default().resolve(fftt, cap),
            };
            link.travel_times.push(vdf.travel_time(0.0));
            link.vdfs.push(vdf);
        }

        self.links.push(link);
        Some(link_id)
    }

    /// Consume the builder and produce a [`PhyNetwork`].
    pub fn build(self) -> PhyNetwork {
        let (out_start, out_links) = build_adjacency(self.nodes.len(), &self.links);
        PhyNetwork {
            nodes:            self.nodes,
            links:            self.links,
            zones:            self.zones,
            node_index:       self.node_index,
            zone_index:       self.zone_index,
            out_start,
            out_links,
            period_count:     self.period_count,
            connectors_built: false,
        }
    }
}

impl Default for NetworkBuilder {
    fn default() -> Self {
        Self::new(1)
    }
}

// ── CSR construction ──────────────────────────────────────────────────────────

/// Counting sort of links by origin node.  Links of one node keep ascending
/// `LinkId` order.
fn build_adjacency(node_count: usize, links: &[Link]) -> (Vec<u32>, Vec<LinkId>) {
    let mut out_start = vec![0u32; node_count + 1];
    for l in links {
        out_start[l.from_node.index() + 1] += 1;
    }
    for i in 1..=node_count {
        out_start[i] += out_start[i - 1];
    }
    debug_assert_eq!(out_start[node_count] as usize, links.len());

    let mut next = out_start.clone();
    let mut out_links = vec![LinkId::INVALID; links.len()];
    for (i, l) in links.iter().enumerate() {
        let slot = &mut next[l.from_node.index()];
        out_links[*slot as usize] = LinkId(i as u32);
        *slot += 1;
    }
    (out_start, out_links)
}
