/// Disjoint-set forest over component slots, with union by size and path compression.
///
/// Slots are created in order, so a slot's index doubles as its birth order. Every
/// root remembers the earliest birth among the slots merged into it.
#[derive(Debug, Clone, Default)]
pub(crate) struct UnionFind {
    parent: Vec<usize>,
    size: Vec<usize>,
    birth: Vec<usize>,
}

impl UnionFind {
    pub(crate) fn new(n_sets: usize) -> Self {
        UnionFind {
            parent: (0..n_sets).collect(),
            size: vec![1; n_sets],
            birth: (0..n_sets).collect(),
        }
    }

    pub(crate) fn make_set(&mut self) -> usize {
        let slot = self.parent.len();
        self.parent.push(slot);
        self.size.push(1);
        self.birth.push(slot);
        slot
    }

    pub(crate) fn union(&mut self, m: usize, n: usize) -> usize {
        let mut root = self.find(m);
        let mut child = self.find(n);
        if root == child {
            return root;
        }
        if self.size[root] < self.size[child] {
            std::mem::swap(&mut root, &mut child);
        }
        self.parent[child] = root;
        self.size[root] += self.size[child];
        self.birth[root] = self.birth[root].min(self.birth[child]);
        root
    }

    pub(crate) fn find(&mut self, mut n: usize) -> usize {
        let mut root = n;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        while self.parent[n] != root {
            let next = self.parent[n];
            self.parent[n] = root;
            n = next;
        }
        root
    }

    pub(crate) fn birth_of(&mut self, n: usize) -> usize {
        let root = self.find(n);
        self.birth[root]
    }

    pub(crate) fn len(&self) -> usize {
        self.parent.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn union_keeps_earliest_birth() {
        let mut union_find = UnionFind::new(2);
        let third = union_find.make_set();
        let fourth = union_find.make_set();
        union_find.union(third, fourth);
        union_find.union(fourth, 1);
        assert_eq!(1, union_find.birth_of(third));
        assert_eq!(union_find.find(1), union_find.find(fourth));
        assert_ne!(union_find.find(0), union_find.find(1));
        assert_eq!(4, union_find.len());
    }

    #[test]
    fn larger_set_becomes_root() {
        let mut union_find = UnionFind::new(4);
        union_find.union(1, 2);
        union_find.union(1, 3);
        let root = union_find.union(0, 3);
        assert_eq!(union_find.find(1), root);
        assert_eq!(0, union_find.birth_of(root));
    }

    #[test]
    fn union_of_same_set_is_a_no_op() {
        let mut union_find = UnionFind::new(3);
        let root = union_find.union(0, 1);
        assert_eq!(root, union_find.union(1, 0));
        assert_eq!(2, union_find.find(2));
    }
}
