//! Selector matching against an [`ElementAdapter`].
//!
//! Complex selectors are matched right to left: the rightmost compound is
//! tested against the candidate element, then each combinator walks the
//! tree toward the left. Descendant and general-sibling combinators
//! backtrack over every candidate ancestor or preceding sibling.

use crate::{
    Combinator, ComplexSelector, CompoundSelector, ElementAdapter, SelectorList, SimpleSelector,
};

/// Match a selector list against an element (any selector in the list).
pub fn matches_selector_list<A: ElementAdapter>(
    adapter: &A,
    element: A::Handle,
    list: &SelectorList,
) -> bool {
    list.selectors
        .iter()
        .any(|selector| matches_complex(adapter, element, selector))
}

/// Match a complex selector against an element.
pub fn matches_complex<A: ElementAdapter>(
    adapter: &A,
    element: A::Handle,
    selector: &ComplexSelector,
) -> bool {
    matches_chain(adapter, element, &selector.first, &selector.rest)
}

/// Match the rightmost compound of `first + rest` against `element`, then
/// recurse leftward through the combinators.
fn matches_chain<A: ElementAdapter>(
    adapter: &A,
    element: A::Handle,
    first: &CompoundSelector,
    rest: &[(Combinator, CompoundSelector)],
) -> bool {
    let Some(((combinator, compound), prefix)) = rest.split_last().map(|(last, prefix)| {
        let (comb, comp) = last;
        ((*comb, comp), prefix)
    }) else {
        return matches_compound(adapter, element, first);
    };

    if !matches_compound(adapter, element, compound) {
        return false;
    }

    match combinator {
        Combinator::Child => adapter
            .parent_element(element)
            .is_some_and(|parent| matches_chain(adapter, parent, first, prefix)),
        Combinator::Descendant => {
            let mut ancestor = adapter.parent_element(element);
            while let Some(candidate) = ancestor {
                if matches_chain(adapter, candidate, first, prefix) {
                    return true;
                }
                ancestor = adapter.parent_element(candidate);
            }
            false
        }
        Combinator::AdjacentSibling => adapter
            .previous_sibling_element(element)
            .is_some_and(|sibling| matches_chain(adapter, sibling, first, prefix)),
        Combinator::GeneralSibling => {
            let mut sibling = adapter.previous_sibling_element(element);
            while let Some(candidate) = sibling {
                if matches_chain(adapter, candidate, first, prefix) {
                    return true;
                }
                sibling = adapter.previous_sibling_element(candidate);
            }
            false
        }
    }
}

/// Match a compound selector against a single element.
pub fn matches_compound<A: ElementAdapter>(
    adapter: &A,
    element: A::Handle,
    compound: &CompoundSelector,
) -> bool {
    compound.simples.iter().all(|simple| match simple {
        SimpleSelector::Universal => true,
        SimpleSelector::Type(name) => adapter.tag_name(element) == name.as_str(),
        SimpleSelector::Class(class) => adapter.has_class(element, class),
        SimpleSelector::Id(id) => adapter
            .element_id(element)
            .is_some_and(|value| value == id.as_str()),
        SimpleSelector::Attribute { name, value } => match value {
            Some(expected) => adapter
                .attribute(element, name)
                .is_some_and(|actual| actual == expected.as_str()),
            None => adapter.attribute(element, name).is_some(),
        },
    })
}
