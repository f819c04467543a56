//! Huffman tree construction and the bit-by-bit decoder that walks it.

use std::{
    cmp::{Ord, Ordering, PartialEq, PartialOrd, Reverse},
    collections::BinaryHeap,
    hash::Hash,
};

use log::{debug, trace};

use crate::{
    bits::EncodedStream,
    code::CodeTable,
    error::{Error, Result},
    frequency::{count_occurrences, FrequencyTable},
};

/// a node of the Huffman tree, owning its children
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node<Symbol> {
    /// one symbol and its occurrences
    Leaf { symbol: Symbol, weight: usize },
    /// exactly two children; the weight is the sum of theirs
    Internal {
        weight: usize,
        left: Box<Node<Symbol>>,
        right: Box<Node<Symbol>>,
    },
}

impl<Symbol> Node<Symbol> {
    pub fn weight(&self) -> usize {
        match self {
            Node::Leaf { weight, .. } | Node::Internal { weight, .. } => *weight,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    /// left and right child, `None` for a leaf
    pub fn children(&self) -> Option<(&Node<Symbol>, &Node<Symbol>)> {
        match self {
            Node::Leaf { .. } => None,
            Node::Internal { left, right, .. } => Some((left.as_ref(), right.as_ref())),
        }
    }

    /// edges on the longest path down to a leaf
    fn depth(&self) -> usize {
        match self {
            Node::Leaf { .. } => 0,
            Node::Internal { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }

    fn leaves(&self) -> usize {
        match self {
            Node::Leaf { .. } => 1,
            Node::Internal { left, right, .. } => left.leaves() + right.leaves(),
        }
    }
}

/// a subtree waiting in the priority queue
#[derive(Debug)]
struct Root<Symbol> {
    /// occurrences beneath this subtree
    weight: usize,

    /// position in the order subtrees entered the queue, breaks weight ties
    order: usize,

    inner: Node<Symbol>,
}

impl<Symbol> Root<Symbol> {
    fn new(order: usize, symbol: Symbol, weight: usize) -> Self {
        Root {
            weight,
            order,
            inner: Node::Leaf { symbol, weight },
        }
    }

    /// merge two roots, combining their weights; `left` was dequeued first
    fn merge(order: usize, left: Self, right: Self) -> Self {
        let weight = left.weight + right.weight;
        Root {
            weight,
            order,
            inner: Node::Internal {
                weight,
                left: Box::new(left.inner),
                right: Box::new(right.inner),
            },
        }
    }
}

impl<Symbol> Ord for Root<Symbol> {
    fn cmp(&self, other: &Self) -> Ordering {
        match Ord::cmp(&self.weight, &other.weight) {
            Ordering::Equal => Ord::cmp(&self.order, &other.order),
            ord => ord,
        }
    }
}
impl<Symbol> PartialOrd for Root<Symbol> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl<Symbol> PartialEq for Root<Symbol> {
    fn eq(&self, other: &Self) -> bool {
        matches!(self.cmp(other), Ordering::Equal)
    }
}
impl<Symbol> Eq for Root<Symbol> {}

/// Huffman tree built from the frequencies of one input sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tree<Symbol> {
    root: Node<Symbol>,
}

impl<Symbol: Ord> Tree<Symbol> {
    /// Builds the tree by repeatedly merging the two lightest subtrees.
    ///
    /// Ties between equal weights go to the subtree that entered the queue
    /// first: leaves enter in ascending symbol order, merged subtrees enter
    /// after all leaves in the order they are created. The first subtree taken
    /// from the queue becomes the left child.
    pub fn new(frequencies: FrequencyTable<Symbol>) -> Result<Self> {
        if frequencies.is_empty() {
            return Err(Error::EmptyAlphabet);
        }
        let mut leaves = frequencies.into_iter().collect::<Vec<(Symbol, usize)>>();
        leaves.sort_unstable_by(|(symbol0, _), (symbol1, _)| Ord::cmp(symbol0, symbol1));
        let distinct = leaves.len();

        let mut queue = leaves
            .into_iter()
            .enumerate()
            .map(|(order, (symbol, weight))| Reverse(Root::new(order, symbol, weight)))
            .collect::<BinaryHeap<Reverse<Root<Symbol>>>>();
        let mut order = distinct;
        loop {
            match (queue.pop(), queue.pop()) {
                (Some(Reverse(left)), Some(Reverse(right))) => {
                    trace!("merging weights {} and {}", left.weight, right.weight);
                    queue.push(Reverse(Root::merge(order, left, right)));
                    order += 1;
                }
                (Some(Reverse(root)), None) => {
                    let tree = Tree { root: root.inner };
                    debug!(
                        "built Huffman tree: {} distinct symbols, weight {}, depth {}",
                        distinct,
                        tree.weight(),
                        tree.depth()
                    );
                    return Ok(tree);
                }
                (None, _) => return Err(Error::EmptyAlphabet),
            }
        }
    }

    /// count occurrence of each symbol in the sequence and build the tree
    pub fn from_sequence<I>(symbols: I) -> Result<Self>
    where
        I: IntoIterator<Item = Symbol>,
        Symbol: Hash,
    {
        Self::new(count_occurrences(symbols))
    }
}

impl<Symbol> Tree<Symbol> {
    pub fn root(&self) -> &Node<Symbol> {
        &self.root
    }

    /// total occurrences, i.e. the length of the input sequence
    pub fn weight(&self) -> usize {
        self.root.weight()
    }

    /// length of the longest codeword path; 0 for a single-symbol tree
    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    /// number of distinct symbols
    pub fn len(&self) -> usize {
        self.root.leaves()
    }

    /// a tree always holds at least one symbol
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl<Symbol: Clone> Tree<Symbol> {
    pub fn code_table(&self) -> CodeTable<Symbol>
    where
        Symbol: Eq + Hash,
    {
        CodeTable::new(self)
    }

    /// Recovers the symbol sequence by walking from the root, 0 to the left
    /// and 1 to the right, emitting a symbol at every leaf.
    ///
    /// A stream that stops inside a codeword fails with
    /// [`Error::TruncatedStream`]; the partial symbol is not emitted.
    pub fn decode(&self, stream: &EncodedStream) -> Result<Vec<Symbol>> {
        let mut decoded = Vec::new();
        let mut current = &self.root;
        let mut trailing_bits = 0;
        for (position, bit) in stream.bits().iter().by_vals().enumerate() {
            let next = match (current, bit) {
                (Node::Internal { left, .. }, false) => left.as_ref(),
                (Node::Internal { right, .. }, true) => right.as_ref(),
                // only a single-symbol tree keeps a leaf as the current node;
                // its codeword is the lone digit 0
                (Node::Leaf { .. }, false) => current,
                (Node::Leaf { .. }, true) => return Err(Error::CorruptStream { position }),
            };
            match next {
                Node::Leaf { symbol, .. } => {
                    decoded.push(symbol.clone());
                    current = &self.root;
                    trailing_bits = 0;
                }
                Node::Internal { .. } => {
                    current = next;
                    trailing_bits += 1;
                }
            }
        }
        if trailing_bits > 0 {
            return Err(Error::TruncatedStream { trailing_bits });
        }
        debug!("decoded {} bits into {} symbols", stream.len(), decoded.len());
        Ok(decoded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_weights(node: &Node<char>) {
        if let Some((left, right)) = node.children() {
            assert_eq!(node.weight(), left.weight() + right.weight());
            assert_weights(left);
            assert_weights(right);
        }
    }

    #[test]
    fn empty_alphabet() {
        assert_eq!(
            Tree::<char>::from_sequence("".chars()),
            Err(Error::EmptyAlphabet)
        );
        assert_eq!(
            Tree::<u8>::new(FrequencyTable::new()),
            Err(Error::EmptyAlphabet)
        );
    }

    #[test]
    fn single_symbol_root_is_leaf() {
        let tree = Tree::from_sequence("aaaa".chars()).unwrap();
        assert_eq!(
            tree.root(),
            &Node::Leaf {
                symbol: 'a',
                weight: 4
            }
        );
        assert_eq!(tree.depth(), 0);
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn weights_add_up() {
        let tree = Tree::from_sequence("abracadabra".chars()).unwrap();
        assert_eq!(tree.weight(), 11);
        assert_eq!(tree.len(), 5);
        assert_weights(tree.root());
    }

    #[test]
    fn ties_follow_symbol_order() {
        // all weights equal: a+b merge first, then c+d, then the two pairs
        let tree = Tree::from_sequence("abcd".chars()).unwrap();
        let (left, right) = tree.root().children().unwrap();
        let (a, b) = left.children().unwrap();
        let (c, d) = right.children().unwrap();
        assert_eq!(a, &Node::Leaf { symbol: 'a', weight: 1 });
        assert_eq!(b, &Node::Leaf { symbol: 'b', weight: 1 });
        assert_eq!(c, &Node::Leaf { symbol: 'c', weight: 1 });
        assert_eq!(d, &Node::Leaf { symbol: 'd', weight: 1 });
    }

    #[test]
    fn lighter_subtree_goes_left() {
        let tree = Tree::from_sequence("aaab".chars()).unwrap();
        let (left, right) = tree.root().children().unwrap();
        assert_eq!(left, &Node::Leaf { symbol: 'b', weight: 1 });
        assert_eq!(right, &Node::Leaf { symbol: 'a', weight: 3 });
    }

    #[test]
    fn decode_walks_tree() {
        // b = 0, a = 1
        let tree = Tree::from_sequence("aaab".chars()).unwrap();
        let stream: EncodedStream = "1101".parse().unwrap();
        assert_eq!(tree.decode(&stream).unwrap(), vec!['a', 'a', 'b', 'a']);
        assert_eq!(tree.decode(&EncodedStream::new()).unwrap(), vec![]);
    }

    #[test]
    fn decode_reports_truncation() {
        // a = 00, b = 01, c = 10, d = 11
        let tree = Tree::from_sequence("abcd".chars()).unwrap();
        let stream: EncodedStream = "00011".parse().unwrap();
        assert_eq!(
            tree.decode(&stream),
            Err(Error::TruncatedStream { trailing_bits: 1 })
        );
    }

    #[test]
    fn single_symbol_decode() {
        let tree = Tree::from_sequence("aaaa".chars()).unwrap();
        let stream: EncodedStream = "000".parse().unwrap();
        assert_eq!(tree.decode(&stream).unwrap(), vec!['a', 'a', 'a']);
        let stream: EncodedStream = "010".parse().unwrap();
        assert_eq!(
            tree.decode(&stream),
            Err(Error::CorruptStream { position: 1 })
        );
    }
}
