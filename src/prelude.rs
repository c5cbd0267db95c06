//! The runtime prelude: a fixed blob of target code the emitted output
//! depends on, written out verbatim once per program.
//!
//! Plain Lua, no metatables beyond what each helper strictly needs:
//! `append`/`mapLength`/`add_init`/`run_inits` back the slice/map/init-order
//! semantics the translated code assumes exist at runtime, and
//! `delete`/`length`/`makeSlice`/`create_error`/`create_closure` back the
//! builtin and method-expression forms the expression translator emits.

pub const PRELUDE: &str = r#"
local builtins = _G.lunar_go_builtins or {}
_G.lunar_go_builtins = builtins

function builtins.append(dst, ...)
	dst = dst or {}
	for i = 1, select('#', ...) do
		local val = select(i, ...)
		table.insert(dst, val)
	end
	return dst
end

function builtins.delete(m, key)
	m[key] = nil
end

function builtins.length(x)
	if x == nil then
		return 0
	end
	return #x
end

function builtins.mapLength(m)
	local l = 0
	if m ~= nil then
		for _ in pairs(m) do
			l = l + 1
		end
	end
	return l
end

function builtins.makeSlice(f, n)
	n = n or 0
	local t = {}
	for i = 1, n do
		t[i] = f()
	end
	return t
end

local inits = {}
function builtins.add_init(f)
	table.insert(inits, f)
end

function builtins.run_inits()
	for _, f in ipairs(inits) do
		f()
	end
end

local errorMt = { __index = { Error = function(self) return self.msg end } }
function builtins.create_error(msg)
	return setmetatable({ msg = msg }, errorMt)
end

local closureCache = setmetatable({}, { __mode = "k" })
function builtins.create_closure(obj, name)
	local byName = closureCache[obj]
	if byName == nil then
		byName = {}
		closureCache[obj] = byName
	end
	local closure = byName[name]
	if closure == nil then
		closure = function(...)
			return obj[name](obj, ...)
		end
		byName[name] = closure
	end
	return closure
end
"#;

/// Emits the prelude verbatim.
pub fn emit_runtime_prelude(w: &mut crate::writer::Writer<'_>) -> crate::writer::WriteResult<()> {
    w.write_string(PRELUDE.trim_start())?;
    w.write_newline()
}
