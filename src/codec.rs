use std::{borrow::Borrow, hash::Hash};

use crate::{
    bits::EncodedStream,
    code::CodeTable,
    error::Result,
    tree::Tree,
};

/// an encoding session: one tree and the code table derived from it
#[derive(Debug, Clone)]
pub struct Codec<Symbol: Eq + Hash> {
    tree: Tree<Symbol>,
    table: CodeTable<Symbol>,
}

impl<Symbol> Codec<Symbol>
where
    Symbol: Ord + Hash + Clone,
{
    pub fn new(tree: Tree<Symbol>) -> Self {
        let table = tree.code_table();
        Codec { tree, table }
    }

    /// build the code from the frequencies of `symbols`
    pub fn from_sequence<I>(symbols: I) -> Result<Self>
    where
        I: IntoIterator<Item = Symbol>,
    {
        Tree::from_sequence(symbols).map(Self::new)
    }

    pub fn tree(&self) -> &Tree<Symbol> {
        &self.tree
    }

    pub fn code_table(&self) -> &CodeTable<Symbol> {
        &self.table
    }

    pub fn encode<I, B>(&self, symbols: I) -> Result<EncodedStream>
    where
        I: IntoIterator<Item = B>,
        B: Borrow<Symbol>,
    {
        self.table.encode(symbols)
    }

    pub fn decode(&self, stream: &EncodedStream) -> Result<Vec<Symbol>> {
        self.tree.decode(stream)
    }
}
