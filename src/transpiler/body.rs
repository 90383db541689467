// Bodies are not parsed. Each line is scanned once: string literals are
// copied untouched, the `self.` receiver is dropped and Python words become
// their Solidity spelling. Control flow, exceptions and tuple assignment
// are carried through verbatim.

pub fn translate_body(lines: &[String]) -> String {
    let mut depth = 0usize;
    let mut translated = Vec::new();

    for line in lines {
        let code = line.trim_start();
        if code.is_empty() || code == "pass" {
            continue;
        }
        let indent = &line[..line.len() - code.len()];
        let converted = translate_line(code);
        depth = nesting_after(&converted, depth);

        // A statement split over several lines is terminated once, on its last line.
        let converted = if depth == 0 {
            terminate(&converted)
        } else {
            converted.trim_end().to_string()
        };
        translated.push(format!("{}{}", indent, converted));
    }

    translated.join("\n")
}

pub fn translate_line(line: &str) -> String {
    let chars: Vec<char> = line.chars().collect();
    let mut out = String::with_capacity(line.len());
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if c == '"' || c == '\'' {
            let end = string_end(&chars, i);
            out.extend(&chars[i..end]);
            i = end;
            continue;
        }

        if c.is_alphabetic() || c == '_' {
            let start = i;
            while i < chars.len() && (chars[i].is_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            let word: String = chars[start..i].iter().collect();
            match word.as_str() {
                "self" if chars.get(i) == Some(&'.') => i += 1,
                "and" => out.push_str("&&"),
                "or" => out.push_str("||"),
                "True" => out.push_str("true"),
                "False" => out.push_str("false"),
                "not" => {
                    out.push('!');
                    while i < chars.len() && chars[i] == ' ' {
                        i += 1;
                    }
                }
                _ => out.push_str(&word),
            }
            continue;
        }

        out.push(c);
        i += 1;
    }

    out
}

fn string_end(chars: &[char], start: usize) -> usize {
    let quote = chars[start];
    let mut i = start + 1;
    while i < chars.len() {
        match chars[i] {
            '\\' => i += 2,
            c if c == quote => return i + 1,
            _ => i += 1,
        }
    }
    chars.len()
}

// Open `(`/`[` nesting after `line`, starting from `depth`.
fn nesting_after(line: &str, mut depth: usize) -> usize {
    let chars: Vec<char> = line.chars().collect();
    let mut i = 0;
    while i < chars.len() {
        match chars[i] {
            '"' | '\'' => {
                i = string_end(&chars, i);
                continue;
            }
            '(' | '[' => depth += 1,
            ')' | ']' => depth = depth.saturating_sub(1),
            _ => {}
        }
        i += 1;
    }
    depth
}

fn terminate(line: &str) -> String {
    let line = line.trim_end();
    match line.chars().last() {
        Some(':' | ';' | '{' | '}' | ',' | '(' | '[') | None => line.to_string(),
        Some(_) => format!("{};", line),
    }
}
