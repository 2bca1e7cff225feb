use crate::{
    lang::{
        tokenizing::{self, Token, TokenList},
        words::{self, Word},
    },
    runtime::error::{self, script_error},
};
use std::collections::HashMap;

/// The compiler backend.  Translates a token stream into 32-bit x86 assembly
/// text in NASM syntax, for an external assembler and linker to turn into an
/// executable.
///
/// All Forth values live on the native call stack, the top of that stack is
/// always the top of the Forth stack.  Every word maps to a short fixed
/// instruction template.  The one exception is the stack dump word `.s`,
/// which emits a runtime loop with freshly generated labels.
///
/// The generated code performs no bounds checking.  A program that underflows
/// its stack is undefined behavior at execution time, this is a known
/// limitation of the fixed template design and is deliberately not papered
/// over here.
///
/// A Compiler owns all of its state, there are no module level counters, so
/// independent compilations in the same process cannot interfere.  Compiling
/// consumes the instance.
pub struct Compiler {
    /// The generated instructions, in token order.
    output: Vec<String>,

    /// The initialized data section, seeded with the printf format strings.
    data_section: Vec<String>,

    /// The uninitialized data section, seeded with the cell that records the
    /// initial stack pointer, plus one dword slot per declared variable.
    bss_section: Vec<String>,

    /// The declared variables and the index of their slot in the bss
    /// section.
    variables: HashMap<String, usize>,

    /// Monotonic counter for generating unique labels.  Labels are never
    /// reused within a compilation.
    label_counter: usize,
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new()
    }
}

impl Compiler {
    /// Create a new compiler with empty output and the seeded data sections.
    pub fn new() -> Compiler {
        Compiler {
            output: Vec::new(),
            data_section: vec![
                "section .data".to_string(),
                "int_format db '%d ',0".to_string(),
                "stack_start db 'Stack: ',0".to_string(),
                "stack_end db '',10,0".to_string(),
                "empty_stack db '<empty>',10,0".to_string(),
            ],
            bss_section: vec![
                "section .bss".to_string(),
                "initial_esp resd 1".to_string(),
            ],
            variables: HashMap::new(),
            label_counter: 0,
        }
    }

    /// Tokenize the given source code and compile it, returning the complete
    /// assembly text.  Any unknown word or redeclared variable aborts the
    /// whole compilation, no partial output is produced.
    pub fn compile_source(self, path: &str, source: &str) -> error::Result<String> {
        let tokens = tokenizing::tokenize_from_source(path, source);
        self.compile(&tokens)
    }

    /// Load a script from a file and compile it.
    pub fn compile_file(self, path: &str) -> error::Result<String> {
        let tokens = tokenizing::tokenize_from_file(path)?;
        self.compile(&tokens)
    }

    /// Compile a token list from start to end.  The stream is consumed left
    /// to right exactly once, there is no backpatching and no forward
    /// references.
    pub fn compile(mut self, tokens: &TokenList) -> error::Result<String> {
        let mut index = 0;

        while index < tokens.len() {
            let token = &tokens[index];

            if let Some(word) = Word::from_name(token.text()) {
                if word == Word::Variable {
                    // The declaration consumes the following token as the new
                    // variable's name.
                    let name = match tokens.get(index + 1) {
                        Some(name) => name,
                        None => {
                            return script_error(
                                token.location(),
                                "Missing variable name after 'variable'".to_string(),
                            );
                        }
                    };

                    self.compile_variable(name)?;
                    index += 2;
                } else {
                    self.compile_word(word);
                    index += 1;
                }
            } else if let Some(number) = words::parse_literal(token.text()) {
                self.compile_literal(number);
                index += 1;
            } else if self.variables.contains_key(token.text()) {
                self.compile_variable_ref(token.text());
                index += 1;
            } else {
                return script_error(
                    token.location(),
                    format!("Unknown word or invalid number: {}", token.text()),
                );
            }
        }

        Ok(self.generate_asm())
    }

    /// Append a single instruction to the output.
    fn emit(&mut self, line: &str) {
        self.output.push(line.to_string());
    }

    /// Append a fixed template of instructions to the output.
    fn emit_all(&mut self, lines: &[&str]) {
        for line in lines {
            self.emit(line);
        }
    }

    /// Draw a fresh label from the counter.  Labels are unique for the
    /// lifetime of the compilation and are never garbage collected.
    fn new_label(&mut self, prefix: &str) -> String {
        self.label_counter += 1;
        format!("{}_{}", prefix, self.label_counter)
    }

    /// Emit the fixed instruction template for a word.  The match is
    /// exhaustive over the closed word set, there is no dynamic lookup.
    fn compile_word(&mut self, word: Word) {
        match word {
            Word::Add => self.emit_all(&["    pop eax", "    add [esp], eax"]),

            Word::Sub => self.emit_all(&[
                "    pop ebx",
                "    pop eax",
                "    sub eax, ebx",
                "    push eax",
            ]),

            Word::Mul => self.emit_all(&[
                "    pop eax",
                "    pop ebx",
                "    imul eax, ebx",
                "    push eax",
            ]),

            // No zero divisor check.  The interpreter backend guards this
            // case, the generated code leaves it to the hardware.
            Word::Mod => self.emit_all(&[
                "    xor edx, edx",
                "    pop ebx",
                "    pop eax",
                "    idiv ebx",
                "    push edx",
            ]),

            Word::Neg => self.emit("    neg dword [esp]"),

            Word::Dup => self.emit_all(&["    mov eax, [esp]", "    push eax"]),

            Word::Swap => self.emit_all(&[
                "    pop eax",
                "    pop ebx",
                "    push eax",
                "    push ebx",
            ]),

            Word::Drop => self.emit("    add esp, 4"),

            Word::Over => self.emit_all(&["    mov eax, [esp+4]", "    push eax"]),

            // nip and tuck are compositions of the simpler templates.
            Word::Nip => {
                self.compile_word(Word::Swap);
                self.compile_word(Word::Drop);
            }

            Word::Tuck => {
                self.compile_word(Word::Swap);
                self.compile_word(Word::Over);
            }

            Word::Store => self.emit_all(&[
                "    pop ebx",
                "    pop eax",
                "    mov [ebx], eax",
            ]),

            Word::Fetch => self.emit_all(&[
                "    pop eax",
                "    mov eax, [eax]",
                "    push eax",
            ]),

            Word::Dot => self.emit_all(&[
                "    push dword [esp]",
                "    push int_format",
                "    call printf",
                "    add esp, 8",
                "    push stack_end",
                "    call printf",
                "    add esp, 4",
                "    pop eax",
            ]),

            Word::DotS => self.compile_dot_s(),

            // Handled by the driver loop, it consumes the following token.
            Word::Variable => unreachable!("variable declarations are handled by compile"),
        }
    }

    /// Emit the runtime loop that prints the whole stack.  The loop walks
    /// from the current stack pointer down to the base pointer captured by
    /// the program prologue, printing one dword per iteration.  Every
    /// invocation draws two fresh labels so multiple stack dumps in one
    /// program cannot collide.  An empty stack fails the entry comparison
    /// immediately and still prints the prefix and terminator.
    fn compile_dot_s(&mut self) {
        let loop_label = self.new_label("print_stack");
        let end_label = self.new_label("end_stack");

        self.emit_all(&[
            "    push stack_start",
            "    call printf",
            "    add esp, 4",
            "    mov ecx, esp",
        ]);

        self.emit(&format!("{}:", loop_label));
        self.emit("    cmp ecx, [initial_esp]");
        self.emit(&format!("    jae {}", end_label));
        self.emit_all(&[
            "    push ecx",
            "    push dword [ecx]",
            "    push int_format",
            "    call printf",
            "    add esp, 8",
            "    pop ecx",
            "    add ecx, 4",
        ]);
        self.emit(&format!("    jmp {}", loop_label));

        self.emit(&format!("{}:", end_label));
        self.emit_all(&[
            "    push stack_end",
            "    call printf",
            "    add esp, 4",
        ]);
    }

    /// Push an integer literal onto the stack.
    fn compile_literal(&mut self, number: i32) {
        self.emit(&format!("    push {}", number));
    }

    /// Reserve a dword slot in the bss section for a new variable.
    /// Redeclaring a name is a fatal error.
    fn compile_variable(&mut self, name: &Token) -> error::Result<()> {
        if self.variables.contains_key(name.text()) {
            return script_error(
                name.location(),
                format!("Variable '{}' already exists", name.text()),
            );
        }

        self.variables
            .insert(name.text().to_string(), self.bss_section.len());
        self.bss_section.push(format!("{}: resd 1", name.text()));

        Ok(())
    }

    /// Referencing a declared variable pushes the address of its slot.
    fn compile_variable_ref(&mut self, name: &str) {
        self.emit(&format!("    push {}", name));
    }

    /// Assemble the final output text.  The section ordering is part of the
    /// output contract: the program prologue captures the initial stack
    /// pointer for the stack dump loops, then come the generated
    /// instructions, the program exit, the data section, and finally the bss
    /// section.
    fn generate_asm(&self) -> String {
        let mut asm = vec![
            "global main".to_string(),
            "extern printf".to_string(),
            "section .text".to_string(),
            "main:".to_string(),
            "    mov [initial_esp], esp".to_string(),
        ];

        asm.extend(self.output.iter().cloned());
        asm.push("    xor eax, eax".to_string());
        asm.push("    ret".to_string());
        asm.extend(self.data_section.iter().cloned());
        asm.extend(self.bss_section.iter().cloned());

        asm.join("\n") + "\n"
    }
}
