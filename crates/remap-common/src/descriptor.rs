//! Type and method descriptor utilities.
//!
//! Descriptors are the compact type notation of the class-file format:
//! `I` for int, `[Ljava/lang/String;` for a string array,
//! `(ILjava/lang/Object;)V` for a method taking an int and an object and
//! returning void. The engine never builds a typed AST for them; everything
//! downstream works on raw descriptor substrings, so the helpers here all
//! operate on `&str` slices.

/// Number of leading `[` array markers.
#[inline]
pub fn array_dimensions(desc: &str) -> usize {
    desc.bytes().take_while(|&b| b == b'[').count()
}

/// The descriptor with all array markers stripped.
#[inline]
pub fn element_type(desc: &str) -> &str {
    &desc[array_dimensions(desc)..]
}

/// Whether this is a primitive (or void) descriptor. Array markers are not
/// stripped first; `[I` is not primitive.
#[inline]
pub fn is_primitive(desc: &str) -> bool {
    matches!(
        desc,
        "B" | "C" | "D" | "F" | "I" | "J" | "S" | "Z" | "V"
    )
}

/// The internal class name of an object descriptor (`Lpkg/Name;` -> `pkg/Name`).
#[inline]
pub fn object_name(desc: &str) -> Option<&str> {
    desc.strip_prefix('L')?.strip_suffix(';')
}

/// Length in bytes of the single field descriptor at the start of `s`,
/// or None if `s` does not start with a well-formed one.
fn field_desc_len(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    let dims = array_dimensions(s);
    match bytes.get(dims)? {
        b'B' | b'C' | b'D' | b'F' | b'I' | b'J' | b'S' | b'Z' => Some(dims + 1),
        b'L' => {
            let semi = s[dims..].find(';')?;
            // An empty class name (`L;`) is malformed.
            if semi < 2 {
                return None;
            }
            Some(dims + semi + 1)
        }
        _ => None,
    }
}

/// Iterator over the raw parameter descriptor substrings of a method descriptor.
pub struct MethodParamIter<'a> {
    rest: &'a str,
}

impl<'a> Iterator for MethodParamIter<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        if self.rest.is_empty() {
            return None;
        }
        let len = field_desc_len(self.rest)?;
        let (param, rest) = self.rest.split_at(len);
        self.rest = rest;
        Some(param)
    }
}

/// Parameter substrings of a method descriptor. Yields nothing for a
/// descriptor without a parameter list.
pub fn method_params(desc: &str) -> MethodParamIter<'_> {
    let inner = desc
        .strip_prefix('(')
        .and_then(|d| d.split_once(')'))
        .map(|(params, _)| params)
        .unwrap_or("");
    MethodParamIter { rest: inner }
}

/// The return descriptor of a method descriptor, or `""` if malformed.
pub fn method_return(desc: &str) -> &str {
    desc.split_once(')').map(|(_, ret)| ret).unwrap_or("")
}

/// Validate a field descriptor: exactly one well-formed type, no `V`.
pub fn is_valid_field_desc(desc: &str) -> bool {
    match field_desc_len(desc) {
        Some(len) => len == desc.len(),
        None => false,
    }
}

/// Validate a method descriptor: `(` params `)` return, where the return may
/// be `V` and each parameter may not.
pub fn is_valid_method_desc(desc: &str) -> bool {
    let Some(rest) = desc.strip_prefix('(') else {
        return false;
    };
    let Some((params, ret)) = rest.split_once(')') else {
        return false;
    };

    let mut remaining = params;
    while !remaining.is_empty() {
        match field_desc_len(remaining) {
            Some(len) => remaining = &remaining[len..],
            None => return false,
        }
    }

    ret == "V" || is_valid_field_desc(ret)
}
