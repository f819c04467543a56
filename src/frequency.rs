use std::{collections::HashMap, hash::Hash};

/// occurrences of each symbol in a sequence
pub type FrequencyTable<Symbol> = HashMap<Symbol, usize>;

/// count occurrences of each symbol
pub fn count_occurrences<I, Symbol>(symbols: I) -> FrequencyTable<Symbol>
where
    I: IntoIterator<Item = Symbol>,
    Symbol: Eq + Hash,
{
    let mut occurrences: FrequencyTable<Symbol> = HashMap::new();
    for symbol in symbols {
        *occurrences.entry(symbol).or_insert(0) += 1;
    }
    occurrences
}
