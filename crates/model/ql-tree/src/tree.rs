//! One module's entity tree and its secondary indices

use indexmap::IndexMap;
use ql_intern::{Interner, Symbol};
use ql_model::{CollectionData, Genus, Node, NodeData, NodeId, NodePool};
use rustc_hash::FxHashMap;

/// One module's tree: a node pool rooted at an unnamed namespace, plus the
/// secondary indices filled in while the tree is built.
pub struct Tree {
    interner: Interner,
    pool: NodePool,
    root: NodeId,
    groups: IndexMap<Symbol, NodeId>,
    modules: IndexMap<Symbol, NodeId>,
    /// Qualified name → UI type, for import-aware base lookup
    qml_types: FxHashMap<String, NodeId>,
    page_titles: FxHashMap<String, NodeId>,
}

impl Tree {
    /// Creates an empty tree rooted at an unnamed namespace. Trees meant to
    /// live in one forest must share the `interner`.
    pub fn new(interner: Interner) -> Self {
        let mut pool = NodePool::new();
        let root = pool.alloc(Node::new(
            interner.intern(""),
            Genus::Cpp,
            NodeData::Namespace(Default::default()),
        ));
        Self {
            interner,
            pool,
            root,
            groups: IndexMap::new(),
            modules: IndexMap::new(),
            qml_types: FxHashMap::default(),
            page_titles: FxHashMap::default(),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn interner(&self) -> &Interner {
        &self.interner
    }

    pub fn pool(&self) -> &NodePool {
        &self.pool
    }

    pub fn pool_mut(&mut self) -> &mut NodePool {
        &mut self.pool
    }

    pub fn node(&self, id: NodeId) -> &Node {
        self.pool.node(id)
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        self.pool.node_mut(id)
    }

    /// Finds, or creates under the root, the group collection called `name`.
    pub fn find_or_create_group(&mut self, name: &str) -> NodeId {
        let symbol = self.interner.intern(name);
        if let Some(&group) = self.groups.get(&symbol) {
            return group;
        }
        let group = self.pool.alloc(Node::new(
            symbol,
            Genus::Doc,
            NodeData::Group(CollectionData::default()),
        ));
        self.pool.add_child(self.root, group);
        self.groups.insert(symbol, group);
        group
    }

    /// Finds, or creates under the root, the module collection called `name`.
    pub fn find_or_create_module(&mut self, name: &str) -> NodeId {
        let symbol = self.interner.intern(name);
        if let Some(&module) = self.modules.get(&symbol) {
            return module;
        }
        let module = self.pool.alloc(Node::new(
            symbol,
            Genus::Doc,
            NodeData::Module(CollectionData::default()),
        ));
        self.pool.add_child(self.root, module);
        self.modules.insert(symbol, module);
        module
    }

    /// Adds `member` to the group called `name`. Collections do not own
    /// their members; the member keeps its parent.
    pub fn add_to_group(&mut self, name: &str, member: NodeId) {
        let group = self.find_or_create_group(name);
        if let NodeData::Group(collection) = &mut self.pool.node_mut(group).data {
            if !collection.members.contains(&member) {
                collection.members.push(member);
            }
        }
    }

    /// Adds `member` to the module called `name`.
    pub fn add_to_module(&mut self, name: &str, member: NodeId) {
        let module = self.find_or_create_module(name);
        if let NodeData::Module(collection) = &mut self.pool.node_mut(module).data {
            if !collection.members.contains(&member) {
                collection.members.push(member);
            }
        }
    }

    pub fn group(&self, name: &str) -> Option<NodeId> {
        self.groups.get(&self.interner.intern(name)).copied()
    }

    pub fn module(&self, name: &str) -> Option<NodeId> {
        self.modules.get(&self.interner.intern(name)).copied()
    }

    /// Registers a UI type under its qualified `Module::Name` key.
    pub fn insert_qml_type(&mut self, qualified_name: &str, id: NodeId) {
        self.qml_types.insert(qualified_name.to_string(), id);
    }

    /// Looks a UI type up by its qualified `Module::Name` key.
    pub fn find_qml_type(&self, qualified_name: &str) -> Option<NodeId> {
        self.qml_types.get(qualified_name).copied()
    }

    /// Looks a UI type up by unqualified name, accepting any module.
    pub fn find_qml_type_by_name(&self, name: &str) -> Option<NodeId> {
        if let Some(id) = self.find_qml_type(name) {
            return Some(id);
        }
        let suffix = format!("::{name}");
        self.qml_types
            .iter()
            .find(|(key, _)| key.ends_with(&suffix))
            .map(|(_, &id)| id)
    }

    pub fn register_page(&mut self, title: &str, id: NodeId) {
        self.page_titles.insert(title.to_string(), id);
    }

    pub fn page_by_title(&self, title: &str) -> Option<NodeId> {
        self.page_titles.get(title).copied()
    }

    /// Depth-first path search from `start`: each path segment must name a
    /// child of the previous match, and the final match must satisfy
    /// `filter`. Returns the first hit in declaration order.
    pub fn find_node_recursive(
        &self,
        path: &[Symbol],
        start: NodeId,
        filter: impl Fn(&Node) -> bool + Copy,
    ) -> Option<NodeId> {
        let (&name, rest) = path.split_first()?;
        for &child in self.pool.children(start) {
            if self.pool.node(child).name != name {
                continue;
            }
            if rest.is_empty() {
                if filter(self.pool.node(child)) {
                    return Some(child);
                }
            } else if self.pool.node(child).is_aggregate() {
                if let Some(found) = self.find_node_recursive(rest, child, filter) {
                    return Some(found);
                }
            }
        }
        None
    }

    /// Finds the class/struct/union at `path`, searching from the root.
    pub fn find_class_node(&self, path: &[Symbol]) -> Option<NodeId> {
        self.find_node_recursive(path, self.root, Node::is_class_node)
    }

    /// Finds any node at `path` whose genus is compatible with `genus`.
    pub fn find_node(&self, path: &[Symbol], start: NodeId, genus: Genus) -> Option<NodeId> {
        self.find_node_recursive(path, start, |node| genus.matches(node.genus))
    }

    /// The `::`-joined path of `id` from the root.
    pub fn qualified_name(&self, id: NodeId) -> String {
        self.pool.qualified_name(id, &self.interner)
    }
}
