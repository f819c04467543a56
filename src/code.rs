//! Code table derived from a Huffman tree, and the encoder that uses it.

use std::{
    borrow::Borrow,
    collections::{hash_map, HashMap},
    fmt::Display,
    hash::Hash,
};

use bitvec::prelude::*;
use log::debug;

use crate::{
    bits::{Codeword, EncodedStream},
    error::{Error, Result},
    frequency::FrequencyTable,
    tree::{Node, Tree},
};

/// codeword of every symbol in a tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable<Symbol: Eq + Hash> {
    codes: HashMap<Symbol, Codeword>,
}

impl<Symbol> CodeTable<Symbol>
where
    Symbol: Eq + Hash + Clone,
{
    /// Collects the root-to-leaf path of every leaf, 0 for each step to the
    /// left and 1 for each step to the right.
    ///
    /// A tree whose root is a leaf has no path to walk, so its only symbol
    /// gets the codeword `0`.
    pub fn new(tree: &Tree<Symbol>) -> Self {
        let mut codes = HashMap::new();
        if let Node::Leaf { symbol, .. } = tree.root() {
            codes.insert(symbol.clone(), Codeword::from_bits(bitvec![0]));
            return CodeTable { codes };
        }

        let mut stack: Vec<(&Node<Symbol>, BitVec)> = vec![(tree.root(), BitVec::new())];
        while let Some((node, path)) = stack.pop() {
            match node {
                Node::Leaf { symbol, .. } => {
                    codes.insert(symbol.clone(), Codeword::from_bits(path));
                }
                Node::Internal { left, right, .. } => {
                    let mut right_path = path.clone();
                    right_path.push(true);
                    let mut left_path = path;
                    left_path.push(false);
                    stack.push((right.as_ref(), right_path));
                    stack.push((left.as_ref(), left_path));
                }
            }
        }
        debug!("generated {} codewords", codes.len());
        CodeTable { codes }
    }
}

impl<Symbol> CodeTable<Symbol>
where
    Symbol: Eq + Hash,
{
    pub fn get(&self, symbol: &Symbol) -> Option<&Codeword> {
        self.codes.get(symbol)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// entries in arbitrary order
    pub fn iter(&self) -> hash_map::Iter<'_, Symbol, Codeword> {
        self.codes.iter()
    }

    /// Concatenates the codeword of each symbol in input order.
    ///
    /// Fails on the first symbol that has no codeword.
    pub fn encode<I, B>(&self, symbols: I) -> Result<EncodedStream>
    where
        I: IntoIterator<Item = B>,
        B: Borrow<Symbol>,
    {
        let mut stream = EncodedStream::new();
        let mut count = 0;
        for (position, symbol) in symbols.into_iter().enumerate() {
            let codeword = self
                .codes
                .get(symbol.borrow())
                .ok_or(Error::UnknownSymbol { position })?;
            stream.push_codeword(codeword);
            count += 1;
        }
        debug!("encoded {} symbols into {} bits", count, stream.len());
        Ok(stream)
    }

    /// bits needed to encode a sequence with the given symbol counts;
    /// symbols without a codeword are ignored
    pub fn encoded_len(&self, frequencies: &FrequencyTable<Symbol>) -> usize {
        frequencies
            .iter()
            .filter_map(|(symbol, count)| self.codes.get(symbol).map(|code| code.len() * count))
            .sum()
    }

    /// format the table as newline separated lines of symbol TAB codeword,
    /// in ascending symbol order
    pub fn format_codebook(&self) -> String
    where
        Symbol: Ord + Display,
    {
        let mut entries = self.codes.iter().collect::<Vec<(&Symbol, &Codeword)>>();
        entries.sort_unstable_by(|(symbol0, _), (symbol1, _)| Ord::cmp(symbol0, symbol1));

        let mut result = String::new();
        let mut line_sep = false;
        for (symbol, code) in entries {
            if line_sep {
                result.push('\n');
            };
            line_sep = true;
            result.push_str(&format!("{}\t{}", symbol, code));
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frequency::count_occurrences;

    fn table_of(text: &str) -> CodeTable<char> {
        Tree::from_sequence(text.chars()).unwrap().code_table()
    }

    #[test]
    fn codes_follow_tree_paths() {
        let table = table_of("abcd");
        assert_eq!(table.len(), 4);
        assert_eq!(table.get(&'a').unwrap().to_string(), "00");
        assert_eq!(table.get(&'b').unwrap().to_string(), "01");
        assert_eq!(table.get(&'c').unwrap().to_string(), "10");
        assert_eq!(table.get(&'d').unwrap().to_string(), "11");
    }

    #[test]
    fn single_symbol_gets_one_digit() {
        let table = table_of("aaaa");
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(&'a').unwrap().to_string(), "0");
        assert_eq!(table.encode("aaaa".chars()).unwrap().to_string(), "0000");
    }

    #[test]
    fn abracadabra_favours_a() {
        let table = table_of("abracadabra");
        let a = table.get(&'a').unwrap().len();
        for (symbol, code) in table.iter() {
            if *symbol != 'a' {
                assert!(a < code.len(), "{} has code {}", symbol, code);
            }
        }
    }

    #[test]
    fn encode_concatenates_in_order() {
        let table = table_of("abcd");
        let stream = table.encode(&['d', 'a', 'c']).unwrap();
        assert_eq!(stream.to_string(), "110010");
    }

    #[test]
    fn encode_rejects_unknown_symbol() {
        let table = table_of("abcd");
        assert_eq!(
            table.encode("abxd".chars()),
            Err(Error::UnknownSymbol { position: 2 })
        );
    }

    #[test]
    fn encoded_len_matches_stream() {
        let text = "mississippi river";
        let table = table_of(text);
        let stream = table.encode(text.chars()).unwrap();
        assert_eq!(table.encoded_len(&count_occurrences(text.chars())), stream.len());
    }

    #[test]
    fn codebook_is_sorted() {
        let table = table_of("abcd");
        assert_eq!(table.format_codebook(), "a\t00\nb\t01\nc\t10\nd\t11");
    }
}
